// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.


//! A brute-force enumerator of every size-bounded rule, straight from the
//! definitions, with no pruning of any kind. Exponential in the number of
//! distinct items, so only usable on small databases, where it serves as an
//! independent oracle for the optimised engine.


use std::collections::BTreeSet;
use crate::mining_algorithm::{MinerParameters, MINIMUM_UTILITY_FLOOR};
use crate::rules::Rule;
use crate::sequences::{Item, Sequence, SequenceDatabase, Utility};

/// Every rule meeting the thresholds, in no particular order.
pub fn enumerate_rules(database:&SequenceDatabase,parameters:&MinerParameters) -> Vec<Rule> {
    let minimum_utility = if parameters.minimum_utility==0.0 { MINIMUM_UTILITY_FLOOR } else { parameters.minimum_utility };
    let alphabet : Vec<Item> = database.iter().flat_map(|(_,sequence)|sequence.items()).collect::<BTreeSet<_>>().into_iter().collect();
    let mut rules = vec![];
    for antecedent in subsets_up_to(&alphabet,parameters.maximum_antecedent_size) {
        let remaining : Vec<Item> = alphabet.iter().copied().filter(|item|!antecedent.contains(item)).collect();
        for consequent in subsets_up_to(&remaining,parameters.maximum_consequent_size) {
            if let Some(rule) = evaluate(database,&antecedent,&consequent,minimum_utility,parameters.minimum_confidence) {
                rules.push(rule);
            }
        }
    }
    rules
}

/// All non-empty subsets with at most maximum_size elements of an ascending
/// slice, each ascending itself.
fn subsets_up_to(items:&[Item],maximum_size:usize) -> Vec<Vec<Item>> {
    let mut result = vec![];
    let mut current = vec![];
    extend_subsets(items,maximum_size,&mut current,&mut result);
    result
}

fn extend_subsets(items:&[Item],maximum_size:usize,current:&mut Vec<Item>,result:&mut Vec<Vec<Item>>) {
    for (position,&item) in items.iter().enumerate() {
        current.push(item);
        result.push(current.clone());
        if current.len()<maximum_size {
            extend_subsets(&items[position+1..],maximum_size,current,result);
        }
        current.pop();
    }
}

fn evaluate(database:&SequenceDatabase,antecedent:&[Item],consequent:&[Item],minimum_utility:Utility,minimum_confidence:f64) -> Option<Rule> {
    let mut antecedent_support = 0;
    let mut support = 0;
    let mut utility = 0.0;
    for (_,sequence) in database.iter() {
        if let Some(last_antecedent) = last_position(sequence,antecedent) {
            antecedent_support+=1;
            if let Some(first_consequent) = first_position(sequence,consequent) {
                if last_antecedent<first_consequent {
                    support+=1;
                    utility+=items_utility(sequence,antecedent)+items_utility(sequence,consequent);
                }
            }
        }
    }
    if support==0 { return None; }
    let confidence = support as f64/antecedent_support as f64;
    if utility>=minimum_utility && confidence>=minimum_confidence {
        Some(Rule{antecedent:antecedent.to_vec(),consequent:consequent.to_vec(),utility,support,confidence})
    } else { None }
}

/// Itemset position of the latest item of the set, or None when one is missing.
fn last_position(sequence:&Sequence,items:&[Item]) -> Option<usize> {
    let mut last = 0;
    for &item in items {
        last = last.max(item_position(sequence,item)?);
    }
    Some(last)
}

/// Itemset position of the earliest item of the set, or None when one is missing.
fn first_position(sequence:&Sequence,items:&[Item]) -> Option<usize> {
    let mut first = usize::MAX;
    for &item in items {
        first = first.min(item_position(sequence,item)?);
    }
    Some(first)
}

fn item_position(sequence:&Sequence,item:Item) -> Option<usize> {
    sequence.itemsets.iter().position(|itemset|itemset.items.contains(&item))
}

fn items_utility(sequence:&Sequence,items:&[Item]) -> Utility {
    let mut total = 0.0;
    for itemset in &sequence.itemsets {
        for (item_position,item) in itemset.items.iter().enumerate() {
            if items.contains(item) {
                total+=itemset.utilities[item_position];
            }
        }
    }
    total
}
