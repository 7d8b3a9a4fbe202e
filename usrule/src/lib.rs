// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.


use serde::Deserialize;
use serde::Serialize;

pub mod sequences;
pub mod sid_list;
pub mod expansion_tables;
pub mod preprocessing;
pub mod mining_algorithm;
pub mod rules;
pub mod exhaustive;

#[derive(thiserror::Error, Debug,Serialize,Deserialize,Clone)]
pub enum UsRuleError {
    #[error("minimum confidence {0} is outside [0,1]")]
    InvalidMinimumConfidence(f64),
    #[error("minimum utility {0} must be a finite non-negative number")]
    InvalidMinimumUtility(f64),
    #[error("the maximum antecedent size must be at least 1")]
    InvalidMaximumAntecedentSize,
    #[error("the maximum consequent size must be at least 1")]
    InvalidMaximumConsequentSize,
    #[error("could not write a discovered rule: {0}")]
    RuleOutput(String),
}
