// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.


//! Database preparation: SEU-based item removal, the item index, the ordered
//! co-occurrence map and the 1×1 seed pairs.


use std::collections::{BTreeMap, HashMap, HashSet};
use crate::sequences::{Item, SequenceDatabase, Utility};
use crate::sid_list::{SidList, SidListRepresentation};

/// Cap on unpromising-item removal rounds. The loop stops on its own when a round
/// removes nothing; the cap is a safety valve against pathological inputs.
pub const MAXIMUM_REMOVAL_ROUNDS : usize = 100;

/// If true, discard seed pairs whose estimated utility is below the threshold.
/// The estimate is an upper bound on the utility of every rule grown from the
/// pair, so nothing reachable is lost.
pub const PRUNE_SEED_PAIRS : bool = true;

/// Summed sequence utilities over ordered item pairs (same itemset with the first
/// item earlier, or a later itemset). After preparation only entries reaching the
/// utility threshold remain, so the pruning checks just ask whether an entry exists.
#[derive(Clone,Debug,Default)]
pub struct CooccurrenceMap {
    map : HashMap<(Item,Item),Utility>,
}

impl CooccurrenceMap {
    fn accumulate(&mut self,first:Item,second:Item,utility:Utility) {
        *self.map.entry((first,second)).or_insert(0.0)+=utility;
    }

    fn retain_at_least(&mut self,threshold:Utility) {
        self.map.retain(|_,utility|*utility>=threshold);
    }

    pub fn contains(&self,first:Item,second:Item) -> bool {
        self.map.contains_key(&(first,second))
    }

    pub fn utility(&self,first:Item,second:Item) -> Option<Utility> {
        self.map.get(&(first,second)).copied()
    }

    pub fn len(&self) -> usize { self.map.len() }

    pub fn is_empty(&self) -> bool { self.map.is_empty() }
}

/// A 1×1 rule candidate x ⇒ y.
#[derive(Clone,Debug)]
pub struct SeedPair {
    /// summed exact utility of the sequences where x occurs in an itemset strictly before y
    pub estimated_utility : Utility,
    /// the sequences where that happens
    pub sids : SidList,
}

/// Everything the expansion engine works from, with sequence ids frozen.
pub struct PreparedDatabase {
    pub database : SequenceDatabase,
    pub item_sids : HashMap<Item,SidList>,
    pub cooccurrence : CooccurrenceMap,
    pub seeds : BTreeMap<(Item,Item),SeedPair>,
    pub removal_rounds : usize,
}

pub fn prepare(mut database:SequenceDatabase,minimum_utility:Utility,representation:SidListRepresentation) -> PreparedDatabase {
    let mut item_seu = compute_item_seu(&database);
    let removal_rounds = remove_unpromising_items(&mut database,&mut item_seu,minimum_utility);
    database.remove_empty_sequences();
    let item_sids = build_item_index(&database,representation);
    let (mut cooccurrence,mut seeds) = build_cooccurrence_and_seeds(&database,representation);
    cooccurrence.retain_at_least(minimum_utility);
    if PRUNE_SEED_PAIRS {
        seeds.retain(|_,seed|seed.estimated_utility>=minimum_utility);
    }
    log::debug!("prepared database: {} sequences, {} items, {} co-occurrence entries, {} seed pairs after {} removal rounds",database.len(),item_sids.len(),cooccurrence.len(),seeds.len(),removal_rounds);
    PreparedDatabase{database,item_sids,cooccurrence,seeds,removal_rounds}
}

/// The SEU of an item: the summed exact utility of every sequence containing it.
/// A valid upper bound on the utility of any rule the item takes part in.
fn compute_item_seu(database:&SequenceDatabase) -> HashMap<Item,Utility> {
    let mut item_seu : HashMap<Item,Utility> = HashMap::new();
    for (_,sequence) in database.iter() {
        for item in sequence.items() {
            *item_seu.entry(item).or_insert(0.0)+=sequence.exact_utility();
        }
    }
    item_seu
}

/// The iterative removal loop. An item whose SEU cannot reach the threshold is
/// deleted from every sequence; the deletions lower the exact utilities of the
/// sequences involved, which lowers the SEU of the survivors in turn, so the loop
/// repeats until a round removes nothing.
///
/// Every surviving item of a mutated sequence is debited the whole utility the
/// sequence lost in the round, whether or not it co-occurred with each deleted
/// item. The debit overshoots, which keeps SEU an upper bound.
fn remove_unpromising_items(database:&mut SequenceDatabase,item_seu:&mut HashMap<Item,Utility>,minimum_utility:Utility) -> usize {
    let mut rounds = 0;
    while rounds<MAXIMUM_REMOVAL_ROUNDS {
        let doomed : HashSet<Item> = item_seu.iter().filter(|&(_,&seu)|seu<minimum_utility).map(|(&item,_)|item).collect();
        if doomed.is_empty() { break; }
        for item in &doomed { item_seu.remove(item); }
        for (sid,removed_utility) in database.remove_items(&doomed) {
            for item in database.sequence(sid).items() {
                if let Some(seu) = item_seu.get_mut(&item) { *seu-=removed_utility; }
            }
        }
        rounds+=1;
        log::trace!("removal round {} deleted {} items",rounds,doomed.len());
    }
    rounds
}

fn build_item_index(database:&SequenceDatabase,representation:SidListRepresentation) -> HashMap<Item,SidList> {
    let mut item_sids : HashMap<Item,SidList> = HashMap::new();
    for (sid,sequence) in database.iter() {
        for item in sequence.items() {
            item_sids.entry(item).or_insert_with(||SidList::new(representation)).add(sid);
        }
    }
    item_sids
}

/// One pass building the co-occurrence map and the seed pairs together.
/// Co-occurrence covers ordered pairs within one itemset as well as across
/// itemsets; a seed pair additionally needs x strictly before y, itemset-wise.
fn build_cooccurrence_and_seeds(database:&SequenceDatabase,representation:SidListRepresentation) -> (CooccurrenceMap,BTreeMap<(Item,Item),SeedPair>) {
    let mut cooccurrence = CooccurrenceMap::default();
    let mut seeds : BTreeMap<(Item,Item),SeedPair> = BTreeMap::new();
    for (sid,sequence) in database.iter() {
        let utility = sequence.exact_utility();
        for (position,itemset) in sequence.itemsets.iter().enumerate() {
            for (item_position,&first) in itemset.items.iter().enumerate() {
                for &second in &itemset.items[item_position+1..] {
                    cooccurrence.accumulate(first,second,utility);
                }
                for later in &sequence.itemsets[position+1..] {
                    for &second in &later.items {
                        cooccurrence.accumulate(first,second,utility);
                        let seed = seeds.entry((first,second)).or_insert_with(||SeedPair{estimated_utility:0.0,sids:SidList::new(representation)});
                        seed.estimated_utility+=utility;
                        seed.sids.add(sid);
                    }
                }
            }
        }
    }
    (cooccurrence,seeds)
}
