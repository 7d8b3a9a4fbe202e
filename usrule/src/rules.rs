// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.


//! Rule records and the sink that receives them


use std::fmt;
use serde::Deserialize;
use serde::Serialize;
use crate::sequences::{Item, Utility};
use crate::UsRuleError;

/// A discovered high-utility sequential rule.
///
/// Both sides are ascending lists of distinct items, and the two sides are
/// disjoint. The engine only ever extends a side by an item larger than the
/// side's current maximum, so the ascending order is also the discovery order.
#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct Rule {
    pub antecedent : Vec<Item>,
    pub consequent : Vec<Item>,
    /// summed exact utility of the rule over its supporting sequences
    pub utility : Utility,
    /// number of sequences the whole rule occurs in
    pub support : usize,
    /// support of the rule divided by the support of the antecedent alone
    pub confidence : f64,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,"{} ==> {}",comma_separated(&self.antecedent),comma_separated(&self.consequent))
    }
}

fn comma_separated(items:&[Item]) -> String {
    items.iter().map(|item|item.to_string()).collect::<Vec<_>>().join(",")
}

/// Receives rules as the engine accepts them.
///
/// The engine stops at the first error: a failing sink aborts the mining run.
pub trait RuleSink {
    fn emit(&mut self,rule:Rule) -> Result<(),UsRuleError>;
}

/// A sink that just keeps the rules in memory.
#[derive(Clone,Debug,Default)]
pub struct RuleCollector {
    pub rules : Vec<Rule>,
}

impl RuleSink for RuleCollector {
    fn emit(&mut self,rule:Rule) -> Result<(),UsRuleError> {
        self.rules.push(rule);
        Ok(())
    }
}
