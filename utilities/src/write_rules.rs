// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.

//! Write discovered rules in the tab-separated interchange format
//! `antecedent\t==> \tconsequent\t#SUP: s\t#CONF: c\t#UTIL: u`.


use std::io::Write;
use usrule::rules::{Rule, RuleSink};
use usrule::sequences::Item;
use usrule::UsRuleError;

/// A sink streaming each accepted rule to the underlying writer as one line.
pub struct RuleWriter<W: Write> {
    writer : W,
    rules_written : usize,
}

impl<W: Write> RuleWriter<W> {
    pub fn new(writer:W) -> RuleWriter<W> {
        RuleWriter{writer,rules_written:0}
    }

    pub fn rules_written(&self) -> usize { self.rules_written }

    /// Flush and hand the underlying writer back.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

pub fn format_rule(rule:&Rule) -> String {
    format!("{}\t==> \t{}\t#SUP: {}\t#CONF: {}\t#UTIL: {}",
        comma_separated(&rule.antecedent),comma_separated(&rule.consequent),
        rule.support,rule.confidence,rule.utility)
}

fn comma_separated(items:&[Item]) -> String {
    items.iter().map(|item|item.to_string()).collect::<Vec<_>>().join(",")
}

impl<W: Write> RuleSink for RuleWriter<W> {
    fn emit(&mut self,rule:Rule) -> Result<(),UsRuleError> {
        writeln!(self.writer,"{}",format_rule(&rule)).map_err(|e|UsRuleError::RuleOutput(e.to_string()))?;
        self.rules_written+=1;
        Ok(())
    }
}
