// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.


//! The mining engine: 1×1 seed construction and the three expansion procedures
//!
//! A rule is grown right first (consequent), then left (antecedent); once a rule
//! has been extended on the left it is only ever extended further on the left.
//! Every rule therefore has exactly one construction path, and each extension
//! item is larger than the side's current maximum. Candidate extensions are
//! discarded early through the co-occurrence map (a pair that never reaches the
//! threshold anywhere cannot take part in a qualifying rule) and through the
//! summed per-candidate bounds maintained while the parent table is consumed.


use std::collections::{BTreeMap, HashMap, HashSet};
use serde::Deserialize;
use serde::Serialize;
use crate::expansion_tables::{ExpansionRow, ExpansionTable, LeftRow, LeftTable, TableBeta};
use crate::preprocessing::{self, CooccurrenceMap, SeedPair};
use crate::rules::{Rule, RuleSink};
use crate::sequences::{Item, Itemset, Sequence, SequenceDatabase, SequenceId, Utility};
use crate::sid_list::{SidList, SidListRepresentation};
use crate::UsRuleError;

/// Substituted for a minimum utility of zero, so that zero-utility rules are
/// never enumerated.
pub const MINIMUM_UTILITY_FLOOR : Utility = 0.001;

#[derive(Clone,Debug,Serialize,Deserialize)]
pub struct MinerParameters {
    /// emit rules with at least this exact utility; 0 is treated as [MINIMUM_UTILITY_FLOOR]
    pub minimum_utility : Utility,
    /// emit rules with at least this confidence, a number in [0,1]
    pub minimum_confidence : f64,
    pub maximum_antecedent_size : usize,
    pub maximum_consequent_size : usize,
    #[serde(default)]
    pub sid_list_representation : SidListRepresentation,
}

impl MinerParameters {
    pub fn new(minimum_utility:Utility,minimum_confidence:f64) -> MinerParameters {
        MinerParameters{
            minimum_utility,
            minimum_confidence,
            maximum_antecedent_size : 4,
            maximum_consequent_size : 4,
            sid_list_representation : SidListRepresentation::default(),
        }
    }

    fn validate(&self) -> Result<(),UsRuleError> {
        if !(0.0..=1.0).contains(&self.minimum_confidence) { return Err(UsRuleError::InvalidMinimumConfidence(self.minimum_confidence)); }
        if !self.minimum_utility.is_finite() || self.minimum_utility<0.0 { return Err(UsRuleError::InvalidMinimumUtility(self.minimum_utility)); }
        if self.maximum_antecedent_size<1 { return Err(UsRuleError::InvalidMaximumAntecedentSize); }
        if self.maximum_consequent_size<1 { return Err(UsRuleError::InvalidMaximumConsequentSize); }
        Ok(())
    }
}

/// Counters describing one mining run.
#[derive(Clone,Debug,Default,Serialize,Deserialize)]
pub struct MiningStatistics {
    /// sequences left after preprocessing
    pub sequence_count : usize,
    /// distinct items left after preprocessing
    pub distinct_item_count : usize,
    pub removal_rounds : usize,
    pub seed_pair_count : usize,
    /// expansion tables materialised, seeds included
    pub expansion_table_count : usize,
    pub rule_count : usize,
}

/// Mine every rule meeting the thresholds, streaming them into the sink.
/// The emission order is unspecified; only the set of rules is.
pub fn mine<S:RuleSink>(database:SequenceDatabase,parameters:&MinerParameters,sink:&mut S) -> Result<MiningStatistics,UsRuleError> {
    parameters.validate()?;
    let minimum_utility = if parameters.minimum_utility==0.0 { MINIMUM_UTILITY_FLOOR } else { parameters.minimum_utility };
    log::debug!("mining {} sequences with minimum utility {} and minimum confidence {}",database.len(),minimum_utility,parameters.minimum_confidence);
    let prepared = preprocessing::prepare(database,minimum_utility,parameters.sid_list_representation);
    let mut statistics = MiningStatistics{
        sequence_count : prepared.database.len(),
        distinct_item_count : prepared.item_sids.len(),
        removal_rounds : prepared.removal_rounds,
        seed_pair_count : prepared.seeds.len(),
        ..Default::default()
    };
    let mut miner = Miner{
        database : &prepared.database,
        item_sids : &prepared.item_sids,
        cooccurrence : &prepared.cooccurrence,
        minimum_utility,
        minimum_confidence : parameters.minimum_confidence,
        maximum_antecedent_size : parameters.maximum_antecedent_size,
        maximum_consequent_size : parameters.maximum_consequent_size,
        statistics : &mut statistics,
        sink,
    };
    for ((x,y),seed) in &prepared.seeds {
        miner.mine_seed(*x,*y,seed)?;
    }
    log::debug!("found {} rules over {} expansion tables",statistics.rule_count,statistics.expansion_table_count);
    Ok(statistics)
}

/// A partial rule under construction. Both sides are ascending and never empty,
/// so the last entry of each is the side's largest item.
#[derive(Clone,Debug)]
struct PartialRule {
    antecedent : Vec<Item>,
    consequent : Vec<Item>,
}

impl PartialRule {
    fn seed(x:Item,y:Item) -> PartialRule {
        PartialRule{antecedent:vec![x],consequent:vec![y]}
    }

    fn largest_antecedent(&self) -> Item { *self.antecedent.last().unwrap() }

    fn largest_consequent(&self) -> Item { *self.consequent.last().unwrap() }

    fn with_right(&self,item:Item) -> PartialRule {
        let mut extended = self.clone();
        extended.consequent.push(item);
        extended
    }

    fn with_left(&self,item:Item) -> PartialRule {
        let mut extended = self.clone();
        extended.antecedent.push(item);
        extended
    }

    fn contains(&self,item:Item) -> bool {
        self.antecedent.contains(&item)||self.consequent.contains(&item)
    }
}

/// Build the expansion table of the 1×1 rule x ⇒ y over the given sequences.
pub fn seed_expansion_table(database:&SequenceDatabase,x:Item,y:Item,sids:&SidList) -> ExpansionTable {
    let mut table = ExpansionTable::default();
    for sid in sids.iter() {
        if let Some(row) = seed_row(database.sequence(sid),sid,x,y) {
            table.push(row);
        }
    }
    table
}

/// One sequence's seed row, or None when x before y does not occur.
fn seed_row(sequence:&Sequence,sid:SequenceId,x:Item,y:Item) -> Option<ExpansionRow> {
    let mut utility = 0.0;
    let mut utility_left = 0.0;
    let mut utility_right = 0.0;
    let mut utility_left_right = 0.0;
    // find x left to right; larger items passed on the way can still extend the antecedent
    let mut alpha : Option<(usize,usize)> = None;
    'alpha: for (position,itemset) in sequence.itemsets.iter().enumerate() {
        for (item_position,&item) in itemset.items.iter().enumerate() {
            if item==x {
                alpha = Some((position,item_position));
                utility+=itemset.utilities[item_position];
                break 'alpha;
            }
            if item>x {
                utility_left+=itemset.utilities[item_position];
            }
        }
    }
    let (alpha_itemset,alpha_position) = alpha?;
    // find y right to left, staying after α; larger items passed on the way can extend the consequent
    let mut beta : Option<(usize,usize)> = None;
    'beta: for position in (alpha_itemset+1..sequence.itemsets.len()).rev() {
        let itemset = &sequence.itemsets[position];
        for item_position in (0..itemset.items.len()).rev() {
            let item = itemset.items[item_position];
            if item==y {
                beta = Some((position,item_position));
                utility+=itemset.utilities[item_position];
                break 'beta;
            }
            if item>y {
                utility_right+=itemset.utilities[item_position];
            }
        }
    }
    let (beta_itemset,beta_position) = beta?;
    // the whole prefix of the β itemset is eligible for the consequent, out-of-order items included
    let beta_items = &sequence.itemsets[beta_itemset];
    for item_position in 0..beta_position {
        if beta_items.items[item_position]>y {
            utility_right+=beta_items.utilities[item_position];
        }
    }
    // the rest of the α itemset can only extend the antecedent
    let alpha_items = &sequence.itemsets[alpha_itemset];
    for item_position in alpha_position+1..alpha_items.items.len() {
        utility_left+=alpha_items.utilities[item_position];
    }
    // strictly between α and β an item may be able to extend either side
    for itemset in &sequence.itemsets[alpha_itemset+1..beta_itemset] {
        for (item_position,&item) in itemset.items.iter().enumerate() {
            let item_utility = itemset.utilities[item_position];
            if item>x&&item>y {
                utility_left_right+=item_utility;
            } else if item>x {
                utility_left+=item_utility;
            } else if item>y {
                utility_right+=item_utility;
            }
        }
    }
    Some(ExpansionRow::new(sid,utility,alpha_itemset,beta_itemset,utility_left,utility_right,utility_left_right))
}

/// Accumulate a row's contribution to the summed bound of an extension item and
/// say whether the item can no longer reach the threshold. Once true for an item
/// it stays true: the remaining rows can add at most `remaining`.
fn update_summed_bound(summed:&mut HashMap<Item,Utility>,item:Item,row_bound:Utility,remaining:Utility,minimum_utility:Utility) -> bool {
    let total = summed.entry(item).or_insert(0.0);
    *total+=row_bound;
    *total+remaining<minimum_utility
}

/// Summed utility of the window's items matching the predicate, rule items excluded.
fn window_utility<F:Fn(Item)->bool>(window:&[Itemset],rule:&PartialRule,predicate:F) -> Utility {
    let mut total = 0.0;
    for itemset in window {
        for (item_position,&item) in itemset.items.iter().enumerate() {
            if !rule.contains(item)&&predicate(item) {
                total+=itemset.utilities[item_position];
            }
        }
    }
    total
}

struct Miner<'a,S> {
    database : &'a SequenceDatabase,
    item_sids : &'a HashMap<Item,SidList>,
    cooccurrence : &'a CooccurrenceMap,
    minimum_utility : Utility,
    minimum_confidence : f64,
    maximum_antecedent_size : usize,
    maximum_consequent_size : usize,
    statistics : &'a mut MiningStatistics,
    sink : &'a mut S,
}

impl<'a,S:RuleSink> Miner<'a,S> {
    fn mine_seed(&mut self,x:Item,y:Item,seed:&SeedPair) -> Result<(),UsRuleError> {
        let antecedent_sids = match self.item_sids.get(&x) {
            Some(sids) => sids,
            None => return Ok(()),
        };
        let table = seed_expansion_table(self.database,x,y,&seed.sids);
        if table.rows.is_empty() { return Ok(()); }
        self.statistics.expansion_table_count+=1;
        let rule = PartialRule::seed(x,y);
        self.maybe_emit(&rule,table.total_utility,table.support(),antecedent_sids.size())?;
        if table.reeu>=self.minimum_utility && rule.consequent.len()+1<=self.maximum_consequent_size {
            self.expand_right(&rule,&table,antecedent_sids)?;
        }
        if table.leeu>=self.minimum_utility && rule.antecedent.len()+1<=self.maximum_antecedent_size {
            self.expand_first_left(&rule,&table,antecedent_sids)?;
        }
        Ok(())
    }

    fn maybe_emit(&mut self,rule:&PartialRule,utility:Utility,support:usize,antecedent_support:usize) -> Result<(),UsRuleError> {
        let confidence = support as f64/antecedent_support as f64;
        if utility>=self.minimum_utility && confidence>=self.minimum_confidence {
            self.statistics.rule_count+=1;
            self.sink.emit(Rule{
                antecedent : rule.antecedent.clone(),
                consequent : rule.consequent.clone(),
                utility,
                support,
                confidence,
            })?;
        }
        Ok(())
    }

    /// Grow the consequent. A candidate found at or after β keeps the parent's β;
    /// a candidate found between α and β drags β back to its own itemset.
    fn expand_right(&mut self,rule:&PartialRule,table:&ExpansionTable,antecedent_sids:&SidList) -> Result<(),UsRuleError> {
        let largest_antecedent = rule.largest_antecedent();
        let largest_consequent = rule.largest_consequent();
        let mut remaining_reeu = table.reeu;
        let mut summed : HashMap<Item,Utility> = HashMap::new();
        let mut dead : HashSet<Item> = HashSet::new();
        let mut children : BTreeMap<Item,ExpansionTable> = BTreeMap::new();
        for row in &table.rows {
            remaining_reeu-=row.reeu;
            let sequence = self.database.sequence(row.sid);
            // region A: itemsets from β onwards
            let mut passed : Vec<(Item,Utility)> = vec![]; // items > largest consequent already walked in this region
            for itemset in &sequence.itemsets[row.beta_itemset..] {
                for (item_position,&item) in itemset.items.iter().enumerate() {
                    if item<=largest_consequent||rule.contains(item) { continue; }
                    let item_utility = itemset.utilities[item_position];
                    if !dead.contains(&item) && self.cooccurrence.contains(largest_antecedent,item) {
                        if update_summed_bound(&mut summed,item,row.reeu,remaining_reeu,self.minimum_utility) {
                            dead.insert(item);
                            children.remove(&item);
                        } else {
                            // items between the old largest consequent and the new one stop being candidates
                            let displaced : Utility = passed.iter().filter(|(other,_)|*other<item).map(|(_,u)|*u).sum();
                            let utility_right = row.utility_right-item_utility-displaced;
                            children.entry(item).or_default().push(ExpansionRow::new(
                                row.sid,row.utility+item_utility,row.alpha_itemset,row.beta_itemset,
                                row.utility_left,utility_right,row.utility_left_right));
                        }
                    }
                    passed.push((item,item_utility));
                }
            }
            // region B: itemsets strictly between α and β, walked backwards. The two
            // running sums cover strictly later itemsets only, so candidates sharing
            // an itemset all see the same state.
            let mut sum_left_until_beta = 0.0;
            let mut sum_left_right_until_beta = 0.0;
            for position in (row.alpha_itemset+1..row.beta_itemset).rev() {
                let itemset = &sequence.itemsets[position];
                let mut itemset_left = 0.0;
                let mut itemset_left_right = 0.0;
                for (item_position,&item) in itemset.items.iter().enumerate() {
                    if rule.contains(item) { continue; }
                    let item_utility = itemset.utilities[item_position];
                    let extends_left = item>largest_antecedent;
                    let extends_right = item>largest_consequent;
                    if extends_left&&!extends_right {
                        itemset_left+=item_utility;
                    } else if extends_right&&!extends_left {
                        // a right extension anchored before the parent's β
                        if !dead.contains(&item) && self.cooccurrence.contains(largest_antecedent,item) {
                            if update_summed_bound(&mut summed,item,row.reeu,remaining_reeu,self.minimum_utility) {
                                dead.insert(item);
                                children.remove(&item);
                            } else {
                                let window = &sequence.itemsets[position..row.beta_itemset];
                                let displaced = window_utility(window,rule,|other|other>largest_consequent&&other<item);
                                let promoted = window_utility(window,rule,|other|other>largest_antecedent&&other>item);
                                let utility_right = row.utility_right-item_utility-displaced+promoted;
                                children.entry(item).or_default().push(ExpansionRow::new(
                                    row.sid,row.utility+item_utility,row.alpha_itemset,position,
                                    row.utility_left-sum_left_until_beta,
                                    utility_right,
                                    row.utility_left_right-sum_left_right_until_beta));
                            }
                        }
                    } else if extends_left&&extends_right {
                        if !dead.contains(&item) && self.cooccurrence.contains(largest_antecedent,item) {
                            if update_summed_bound(&mut summed,item,row.reeu,remaining_reeu,self.minimum_utility) {
                                dead.insert(item);
                                children.remove(&item);
                            } else {
                                let window = &sequence.itemsets[position..row.beta_itemset];
                                let displaced = window_utility(window,rule,|other|other>largest_consequent&&other<largest_antecedent&&other<=item);
                                children.entry(item).or_default().push(ExpansionRow::new(
                                    row.sid,row.utility+item_utility,row.alpha_itemset,position,
                                    row.utility_left-sum_left_until_beta,
                                    row.utility_right-displaced,
                                    row.utility_left_right-item_utility-sum_left_right_until_beta));
                            }
                        }
                        // the cumulative sum includes pruned candidates too
                        itemset_left_right+=item_utility;
                    }
                }
                sum_left_until_beta+=itemset_left;
                sum_left_right_until_beta+=itemset_left_right;
            }
        }
        for (item,child) in children {
            self.statistics.expansion_table_count+=1;
            let child_rule = rule.with_right(item);
            self.maybe_emit(&child_rule,child.total_utility,child.support(),antecedent_sids.size())?;
            if child.reeu>=self.minimum_utility && child_rule.consequent.len()+1<=self.maximum_consequent_size {
                self.expand_right(&child_rule,&child,antecedent_sids)?;
            }
            if child.leeu>=self.minimum_utility && child_rule.antecedent.len()+1<=self.maximum_antecedent_size {
                self.expand_first_left(&child_rule,&child,antecedent_sids)?;
            }
        }
        Ok(())
    }

    /// Grow the antecedent for the first time. The children are LE-tables: α and
    /// the right-hand reservoirs are gone for good, the left-only pool absorbs
    /// the either-side pool, and β is frozen per sequence.
    fn expand_first_left(&mut self,rule:&PartialRule,table:&ExpansionTable,antecedent_sids:&SidList) -> Result<(),UsRuleError> {
        let largest_antecedent = rule.largest_antecedent();
        let largest_consequent = rule.largest_consequent();
        let mut remaining_leeu = table.leeu;
        let mut summed : HashMap<Item,Utility> = HashMap::new();
        let mut dead : HashSet<Item> = HashSet::new();
        let mut children : BTreeMap<Item,LeftTable> = BTreeMap::new();
        for row in &table.rows {
            remaining_leeu-=row.leeu;
            let sequence = self.database.sequence(row.sid);
            for itemset in &sequence.itemsets[..row.beta_itemset] {
                for (item_position,&item) in itemset.items.iter().enumerate() {
                    if item<=largest_antecedent||rule.contains(item) { continue; }
                    if dead.contains(&item)||!self.cooccurrence.contains(item,largest_consequent) { continue; }
                    if update_summed_bound(&mut summed,item,row.leeu,remaining_leeu,self.minimum_utility) {
                        dead.insert(item);
                        children.remove(&item);
                        continue;
                    }
                    let item_utility = itemset.utilities[item_position];
                    let window = &sequence.itemsets[..row.beta_itemset];
                    // items between the old largest antecedent and the new one stop being candidates
                    let displaced = window_utility(window,rule,|other|other>largest_antecedent&&other<item);
                    let utility_left = row.utility_left+row.utility_left_right-item_utility-displaced;
                    children.entry(item).or_default().push(LeftRow::new(row.sid,row.utility+item_utility,utility_left));
                }
            }
        }
        if children.is_empty() { return Ok(()); }
        let table_beta : TableBeta = table.rows.iter().map(|row|(row.sid,row.beta_itemset)).collect();
        self.finish_left_children(rule,children,&table_beta,antecedent_sids)
    }

    /// Grow the antecedent again, from an LE-table, with β looked up in the map
    /// shared by the whole left-expansion subtree.
    fn expand_second_left(&mut self,rule:&PartialRule,table:&LeftTable,table_beta:&TableBeta,antecedent_sids:&SidList) -> Result<(),UsRuleError> {
        let largest_antecedent = rule.largest_antecedent();
        let largest_consequent = rule.largest_consequent();
        let mut remaining_leeu = table.leeu;
        let mut summed : HashMap<Item,Utility> = HashMap::new();
        let mut dead : HashSet<Item> = HashSet::new();
        let mut children : BTreeMap<Item,LeftTable> = BTreeMap::new();
        for row in &table.rows {
            remaining_leeu-=row.leeu;
            let beta_itemset = match table_beta.get(&row.sid) {
                Some(&beta_itemset) => beta_itemset,
                None => continue,
            };
            let sequence = self.database.sequence(row.sid);
            for itemset in &sequence.itemsets[..beta_itemset] {
                for (item_position,&item) in itemset.items.iter().enumerate() {
                    if item<=largest_antecedent||rule.contains(item) { continue; }
                    if dead.contains(&item)||!self.cooccurrence.contains(item,largest_consequent) { continue; }
                    if update_summed_bound(&mut summed,item,row.leeu,remaining_leeu,self.minimum_utility) {
                        dead.insert(item);
                        children.remove(&item);
                        continue;
                    }
                    let item_utility = itemset.utilities[item_position];
                    let window = &sequence.itemsets[..beta_itemset];
                    let displaced = window_utility(window,rule,|other|other>largest_antecedent&&other<item);
                    let utility_left = row.utility_left-item_utility-displaced;
                    children.entry(item).or_default().push(LeftRow::new(row.sid,row.utility+item_utility,utility_left));
                }
            }
        }
        if children.is_empty() { return Ok(()); }
        self.finish_left_children(rule,children,table_beta,antecedent_sids)
    }

    /// Emission and recursion shared by both left-expansion procedures. The
    /// antecedent grew, so its support is recomputed by sid-list intersection.
    fn finish_left_children(&mut self,rule:&PartialRule,children:BTreeMap<Item,LeftTable>,table_beta:&TableBeta,antecedent_sids:&SidList) -> Result<(),UsRuleError> {
        for (item,child) in children {
            self.statistics.expansion_table_count+=1;
            let child_rule = rule.with_left(item);
            let child_antecedent_sids = match self.item_sids.get(&item) {
                Some(item_sids) => antecedent_sids.intersection(item_sids),
                None => continue,
            };
            self.maybe_emit(&child_rule,child.total_utility,child.support(),child_antecedent_sids.size())?;
            if child.leeu>=self.minimum_utility && child_rule.antecedent.len()+1<=self.maximum_antecedent_size {
                self.expand_second_left(&child_rule,&child,table_beta,&child_antecedent_sids)?;
            }
        }
        Ok(())
    }
}
