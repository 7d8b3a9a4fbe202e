// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.


//! The per-rule summary tables driving expansion
//!
//! A table holds one row per sequence containing the rule. The reservoirs of a row
//! partition the utility still reachable around the rule occurrence by which side a
//! future item could extend, and the LEEU/REEU bounds derived from them decide
//! whether an expansion direction is worth exploring at all.


use std::collections::HashMap;
use crate::sequences::{SequenceId, Utility};

/// One sequence's view of a partial rule during right (and first left) expansion.
#[derive(Clone,Debug)]
pub struct ExpansionRow {
    pub sid : SequenceId,
    /// exact utility of the rule occurrence in this sequence
    pub utility : Utility,
    /// itemset position completing the antecedent occurrence
    pub alpha_itemset : usize,
    /// itemset position at which the consequent occurrence starts
    pub beta_itemset : usize,
    /// summed utility of items only able to extend the antecedent
    pub utility_left : Utility,
    /// summed utility of items only able to extend the consequent
    pub utility_right : Utility,
    /// summed utility of items between α and β able to extend either side
    pub utility_left_right : Utility,
    pub leeu : Utility,
    pub reeu : Utility,
}

impl ExpansionRow {
    /// Build a row, deriving its expansion bounds from the reservoirs.
    pub fn new(sid:SequenceId,utility:Utility,alpha_itemset:usize,beta_itemset:usize,utility_left:Utility,utility_right:Utility,utility_left_right:Utility) -> ExpansionRow {
        let (leeu,reeu) = expansion_bounds(utility,utility_left,utility_right,utility_left_right);
        ExpansionRow{sid,utility,alpha_itemset,beta_itemset,utility_left,utility_right,utility_left_right,leeu,reeu}
    }
}

/// The left/right expansion bounds of a row.
///
/// An empty reservoir on a side means no candidate item exists there in this
/// sequence, so no rule expanded on that side can contain the row at all and the
/// bound collapses to zero.
pub fn expansion_bounds(utility:Utility,utility_left:Utility,utility_right:Utility,utility_left_right:Utility) -> (Utility,Utility) {
    if utility_left_right!=0.0 {
        (utility+utility_left_right+utility_left,
         utility+utility_left_right+utility_left+utility_right)
    } else {
        let leeu = if utility_left!=0.0 { utility+utility_left } else { 0.0 };
        let reeu = if utility_right!=0.0 { utility+utility_right+utility_left } else { 0.0 };
        (leeu,reeu)
    }
}

/// The table used while right expansion is still possible.
#[derive(Clone,Debug,Default)]
pub struct ExpansionTable {
    pub rows : Vec<ExpansionRow>,
    pub total_utility : Utility,
    pub leeu : Utility,
    pub reeu : Utility,
}

impl ExpansionTable {
    pub fn push(&mut self,row:ExpansionRow) {
        self.total_utility+=row.utility;
        self.leeu+=row.leeu;
        self.reeu+=row.reeu;
        self.rows.push(row);
    }

    /// The support of the rule: one row per sequence containing it.
    pub fn support(&self) -> usize { self.rows.len() }
}

/// One sequence's view once only left expansion remains. α and the right-hand
/// reservoirs are gone for good by then.
#[derive(Clone,Debug)]
pub struct LeftRow {
    pub sid : SequenceId,
    pub utility : Utility,
    pub utility_left : Utility,
    pub leeu : Utility,
}

impl LeftRow {
    pub fn new(sid:SequenceId,utility:Utility,utility_left:Utility) -> LeftRow {
        let leeu = if utility_left!=0.0 { utility+utility_left } else { 0.0 };
        LeftRow{sid,utility,utility_left,leeu}
    }
}

/// The table used once the engine is past the first left expansion.
#[derive(Clone,Debug,Default)]
pub struct LeftTable {
    pub rows : Vec<LeftRow>,
    pub total_utility : Utility,
    pub leeu : Utility,
}

impl LeftTable {
    pub fn push(&mut self,row:LeftRow) {
        self.total_utility+=row.utility;
        self.leeu+=row.leeu;
        self.rows.push(row);
    }

    pub fn support(&self) -> usize { self.rows.len() }
}

/// β positions per sequence, shared by every deeper left expansion of a rule
/// because left expansion never changes the consequent.
pub type TableBeta = HashMap<SequenceId,usize>;
