// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.


//! The optimised engine and the definition-level brute-force enumerator must
//! produce exactly the same rule set. This is the strongest check on the table
//! bookkeeping: an unsound bound loses rules here, a wrong reservoir changes a
//! utility.


use usrule::exhaustive;
use usrule::mining_algorithm::{mine, MinerParameters};
use usrule::rules::{Rule, RuleCollector};
use usrule::sequences::{Item, Itemset, Sequence, SequenceDatabase};
use usrule::sid_list::SidListRepresentation;

fn sequence(itemsets:&[&[(u32,f64)]]) -> Sequence {
    Sequence::new(itemsets.iter().map(|entries|Itemset::new(
        entries.iter().map(|(item,_)|Item(*item)).collect(),
        entries.iter().map(|(_,utility)|*utility).collect(),
    )).collect(),None)
}

/// Sequences mixing shared itemsets, items between α and β, and items on both
/// sides of every interesting boundary.
fn interleaved_database() -> SequenceDatabase {
    SequenceDatabase::new(vec![
        sequence(&[&[(1,3.0)],&[(4,2.0),(6,1.0)],&[(2,4.0)],&[(5,8.0)]]),
        sequence(&[&[(2,1.0),(3,6.0)],&[(1,2.0)],&[(4,1.0),(5,2.0)],&[(6,3.0)]]),
        sequence(&[&[(1,4.0)],&[(2,2.0),(5,1.0)],&[(3,4.0),(6,2.0)]]),
        sequence(&[&[(3,2.0)],&[(4,5.0)],&[(2,2.0),(6,2.0)]]),
        // a consequent extension (3) sitting between a larger antecedent (5) and
        // its consequent (2), with an either-side item (7) sharing its itemset
        sequence(&[&[(5,2.0)],&[(3,1.0),(7,2.0)],&[(2,3.0)]]),
    ])
}

/// A database with a wide utility spread, so that the SEU removal loop actually
/// deletes items for the higher thresholds.
fn lopsided_database() -> SequenceDatabase {
    SequenceDatabase::new(vec![
        sequence(&[&[(1,1.0)],&[(2,1.0),(3,1.0)]]),
        sequence(&[&[(4,30.0)],&[(5,20.0)],&[(6,25.0)]]),
        sequence(&[&[(1,1.0),(4,10.0)],&[(6,15.0)]]),
        sequence(&[&[(4,12.0)],&[(5,3.0),(6,6.0)]]),
    ])
}

fn sort_key(rule:&Rule) -> (Vec<Item>,Vec<Item>) {
    (rule.antecedent.clone(),rule.consequent.clone())
}

fn mined_rules(database:&SequenceDatabase,parameters:&MinerParameters) -> Vec<Rule> {
    let mut collector = RuleCollector::default();
    mine(database.clone(),parameters,&mut collector).unwrap();
    let mut rules = collector.rules;
    rules.sort_by_key(sort_key);
    rules
}

fn assert_agreement(database:&SequenceDatabase,parameters:&MinerParameters) {
    let mined = mined_rules(database,parameters);
    let mut reference = exhaustive::enumerate_rules(database,parameters);
    reference.sort_by_key(sort_key);
    let summary = |rules:&[Rule]|rules.iter().map(|r|r.to_string()).collect::<Vec<_>>().join("; ");
    assert_eq!(mined.len(),reference.len(),"engine [{}] vs reference [{}] with {:?}",summary(&mined),summary(&reference),parameters);
    for (found,expected) in mined.iter().zip(reference.iter()) {
        assert_eq!(expected.antecedent,found.antecedent);
        assert_eq!(expected.consequent,found.consequent);
        assert_eq!(expected.support,found.support,"support of {}",expected);
        assert!((expected.utility-found.utility).abs()<1e-9,"utility of {}: {} vs {}",expected,found.utility,expected.utility);
        assert!((expected.confidence-found.confidence).abs()<1e-12,"confidence of {}",expected);
    }
}

fn parameter_grid() -> Vec<MinerParameters> {
    let mut grid = vec![];
    for &minimum_utility in &[0.5,5.0,12.0,20.0] {
        for &minimum_confidence in &[0.0,0.4,0.8,1.0] {
            for &(maximum_antecedent_size,maximum_consequent_size) in &[(4,4),(2,2),(1,2),(3,1)] {
                grid.push(MinerParameters{
                    minimum_utility,
                    minimum_confidence,
                    maximum_antecedent_size,
                    maximum_consequent_size,
                    sid_list_representation : Default::default(),
                });
            }
        }
    }
    grid
}

#[test]
fn agreement_on_the_interleaved_database() {
    let database = interleaved_database();
    for parameters in parameter_grid() {
        assert_agreement(&database,&parameters);
    }
}

#[test]
fn agreement_on_the_lopsided_database() {
    let database = lopsided_database();
    for parameters in parameter_grid() {
        assert_agreement(&database,&parameters);
    }
}

#[test]
/// The sorted-array sid lists are observably identical to the bitset ones.
fn agreement_with_sorted_array_sid_lists() {
    let database = interleaved_database();
    for mut parameters in parameter_grid() {
        parameters.sid_list_representation = SidListRepresentation::SortedArray;
        assert_agreement(&database,&parameters);
    }
}

#[test]
/// Two runs on the same input give the same rules.
fn mining_is_deterministic() {
    let database = interleaved_database();
    let parameters = MinerParameters::new(5.0,0.4);
    assert_eq!(mined_rules(&database,&parameters),mined_rules(&database,&parameters));
}

#[test]
/// Reordering the input sequences does not change the rule set.
fn sequence_order_does_not_matter() {
    let database = interleaved_database();
    let mut reversed = database.clone();
    reversed.sequences.reverse();
    for parameters in parameter_grid() {
        let forwards = mined_rules(&database,&parameters);
        let backwards = mined_rules(&reversed,&parameters);
        assert_eq!(forwards.len(),backwards.len());
        for (a,b) in forwards.iter().zip(backwards.iter()) {
            assert_eq!(a.antecedent,b.antecedent);
            assert_eq!(a.consequent,b.consequent);
            assert_eq!(a.support,b.support);
            assert!((a.utility-b.utility).abs()<1e-9);
        }
    }
}
