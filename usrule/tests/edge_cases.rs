// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.


//! Test some edge cases (and check that bad parameters correctly produce errors)


use usrule::mining_algorithm::{mine, MinerParameters};
use usrule::rules::RuleCollector;
use usrule::sequences::{Item, Itemset, Sequence, SequenceDatabase, SequenceId};
use usrule::UsRuleError;

fn sequence(itemsets:&[&[(u32,f64)]]) -> Sequence {
    Sequence::new(itemsets.iter().map(|entries|Itemset::new(
        entries.iter().map(|(item,_)|Item(*item)).collect(),
        entries.iter().map(|(_,utility)|*utility).collect(),
    )).collect(),None)
}

fn try_mine(database:SequenceDatabase,parameters:&MinerParameters) -> Result<Vec<usrule::rules::Rule>,UsRuleError> {
    let mut collector = RuleCollector::default();
    mine(database,parameters,&mut collector)?;
    Ok(collector.rules)
}

#[test]
/// A confidence outside [0,1] is rejected before any work happens.
fn test_bad_confidence() {
    let mut parameters = MinerParameters::new(1.0,1.5);
    match try_mine(SequenceDatabase::default(),&parameters) {
        Err(UsRuleError::InvalidMinimumConfidence(c)) => assert_eq!(1.5,c),
        other => panic!("expecting an invalid confidence error, got {:?}",other),
    }
    parameters.minimum_confidence = -0.1;
    assert!(matches!(try_mine(SequenceDatabase::default(),&parameters),Err(UsRuleError::InvalidMinimumConfidence(_))));
}

#[test]
/// A negative or non-finite minimum utility is rejected.
fn test_bad_minimum_utility() {
    let parameters = MinerParameters::new(-1.0,0.5);
    assert!(matches!(try_mine(SequenceDatabase::default(),&parameters),Err(UsRuleError::InvalidMinimumUtility(_))));
    let parameters = MinerParameters::new(f64::NAN,0.5);
    assert!(matches!(try_mine(SequenceDatabase::default(),&parameters),Err(UsRuleError::InvalidMinimumUtility(_))));
}

#[test]
/// Size caps below 1 are rejected.
fn test_bad_size_caps() {
    let mut parameters = MinerParameters::new(1.0,0.5);
    parameters.maximum_antecedent_size = 0;
    assert!(matches!(try_mine(SequenceDatabase::default(),&parameters),Err(UsRuleError::InvalidMaximumAntecedentSize)));
    let mut parameters = MinerParameters::new(1.0,0.5);
    parameters.maximum_consequent_size = 0;
    assert!(matches!(try_mine(SequenceDatabase::default(),&parameters),Err(UsRuleError::InvalidMaximumConsequentSize)));
}

#[test]
/// An empty database mines to an empty rule set.
fn test_empty_database() {
    let rules = try_mine(SequenceDatabase::default(),&MinerParameters::new(1.0,0.5)).unwrap();
    assert_eq!(0,rules.len());
}

#[test]
/// A minimum utility of zero is replaced by a small epsilon, so rules of
/// negligible utility are still not enumerated.
fn test_zero_minimum_utility() {
    let database = SequenceDatabase::new(vec![sequence(&[&[(1,0.0002)],&[(2,0.0002)]])]);
    let rules = try_mine(database,&MinerParameters::new(0.0,0.0)).unwrap();
    assert_eq!(0,rules.len());
    // the same shape with real utilities is found as usual
    let database = SequenceDatabase::new(vec![sequence(&[&[(1,1.0)],&[(2,1.0)]])]);
    let rules = try_mine(database,&MinerParameters::new(0.0,0.0)).unwrap();
    assert_eq!(1,rules.len());
}

#[test]
/// With both caps at one only 1×1 rules come out, whatever the database offers.
fn test_caps_of_one() {
    let database = SequenceDatabase::new(vec![
        sequence(&[&[(1,5.0),(2,5.0)],&[(3,5.0),(4,5.0)]]),
        sequence(&[&[(1,5.0),(2,5.0)],&[(3,5.0),(4,5.0)]]),
    ]);
    let mut parameters = MinerParameters::new(1.0,0.0);
    parameters.maximum_antecedent_size = 1;
    parameters.maximum_consequent_size = 1;
    let rules = try_mine(database,&parameters).unwrap();
    assert!(!rules.is_empty());
    for rule in &rules {
        assert_eq!(1,rule.antecedent.len());
        assert_eq!(1,rule.consequent.len());
    }
}

#[test]
/// When every sequence supporting the antecedent also supports the rule the
/// confidence is exactly one.
fn test_confidence_of_exactly_one() {
    let database = SequenceDatabase::new(vec![
        sequence(&[&[(1,2.0)],&[(2,3.0)]]),
        sequence(&[&[(1,2.0)],&[(2,3.0)]]),
    ]);
    let rules = try_mine(database,&MinerParameters::new(1.0,1.0)).unwrap();
    assert_eq!(1,rules.len());
    assert_eq!(1.0,rules[0].confidence);
}

#[test]
/// Emitted rules keep their two sides disjoint and within the caps.
fn test_rule_shape_invariants() {
    let database = SequenceDatabase::new(vec![
        sequence(&[&[(1,3.0)],&[(2,2.0),(4,1.0)],&[(3,4.0),(5,2.0)]]),
        sequence(&[&[(1,1.0),(2,2.0)],&[(4,3.0)],&[(5,5.0)]]),
        sequence(&[&[(2,4.0)],&[(3,1.0)],&[(4,2.0),(5,3.0)]]),
    ]);
    let mut parameters = MinerParameters::new(2.0,0.0);
    parameters.maximum_antecedent_size = 2;
    parameters.maximum_consequent_size = 3;
    let rules = try_mine(database,&parameters).unwrap();
    assert!(!rules.is_empty());
    for rule in &rules {
        assert!((1..=2).contains(&rule.antecedent.len()),"{}",rule);
        assert!((1..=3).contains(&rule.consequent.len()),"{}",rule);
        assert!(rule.antecedent.iter().all(|item|!rule.consequent.contains(item)),"{}",rule);
        assert!(rule.utility>=2.0);
        assert!(rule.confidence>0.0&&rule.confidence<=1.0);
    }
}

#[test]
/// Removing single items cascades to emptied itemsets, and emptied sequences go
/// when asked.
fn test_item_removal_cascade() {
    let mut database = SequenceDatabase::new(vec![sequence(&[&[(1,2.0)],&[(2,3.0),(3,4.0)]])]);
    assert_eq!(3.0,database.remove_item(SequenceId(0),1,0));
    assert_eq!(2,database.sequence(SequenceId(0)).itemsets.len());
    assert_eq!(6.0,database.exact_utility(SequenceId(0)));
    assert_eq!(4.0,database.remove_item(SequenceId(0),1,0));
    assert_eq!(1,database.sequence(SequenceId(0)).itemsets.len());
    assert_eq!(2.0,database.remove_item(SequenceId(0),0,0));
    assert!(database.sequence(SequenceId(0)).is_empty());
    assert_eq!(1,database.len()); // ids stay stable until explicitly compacted
    database.remove_empty_sequences();
    assert!(database.is_empty());
}

#[test]
/// The statistics describe the run and survive a serde round trip.
fn test_statistics() {
    let database = SequenceDatabase::new(vec![
        sequence(&[&[(1,1.0)],&[(2,1.0)]]),
        sequence(&[&[(3,100.0)],&[(4,100.0)]]),
    ]);
    let mut collector = RuleCollector::default();
    let statistics = mine(database,&MinerParameters::new(50.0,0.5),&mut collector).unwrap();
    assert_eq!(1,statistics.sequence_count);
    assert_eq!(2,statistics.distinct_item_count);
    assert_eq!(1,statistics.rule_count);
    assert_eq!(1,statistics.seed_pair_count);
    assert!(statistics.removal_rounds>=1);
    let encoded = serde_json::to_string(&statistics).unwrap();
    let decoded : usrule::mining_algorithm::MiningStatistics = serde_json::from_str(&encoded).unwrap();
    assert_eq!(statistics.rule_count,decoded.rule_count);
}
