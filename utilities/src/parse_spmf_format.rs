// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.

//! Parse the whitespace-separated sequence format used by the published
//! utility-sequence datasets (SPMF and kin): one sequence per line, items as
//! `item[:utility]`, `-1` closing an itemset, `-2` closing the sequence, and an
//! optional trailing `SUtility:` token fixing the sequence's exact utility.


use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use anyhow::anyhow;
use usrule::sequences::{Item, Itemset, Sequence, SequenceDatabase, Utility};

/// Utility assumed for an item token carrying none.
pub const DEFAULT_ITEM_UTILITY : Utility = 1.0;

pub fn parse_file<P: AsRef<Path>>(path:P,maximum_sequences:usize) -> anyhow::Result<SequenceDatabase> {
    parse_reader(BufReader::new(File::open(path)?),maximum_sequences)
}

/// Blank lines and lines starting with `#`, `%` or `@` (the usual dataset
/// comment conventions) are skipped and do not count against the cap.
pub fn parse_reader<R: BufRead>(reader:R,maximum_sequences:usize) -> anyhow::Result<SequenceDatabase> {
    let mut sequences = vec![];
    for (line_number,line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty()||line.starts_with('#')||line.starts_with('%')||line.starts_with('@') { continue; }
        if sequences.len()>=maximum_sequences { break; }
        let sequence = parse_line(line).map_err(|e|anyhow!("line {}: {}",line_number+1,e))?;
        sequences.push(sequence);
    }
    Ok(SequenceDatabase::new(sequences))
}

/// One line, one sequence. The end of the line closes a still-open itemset, so a
/// missing final `-1 -2` is tolerated.
pub fn parse_line(line:&str) -> anyhow::Result<Sequence> {
    let mut itemsets : Vec<Itemset> = vec![];
    let mut pending : Vec<(Item,Utility)> = vec![];
    let mut fixed_utility : Option<Utility> = None;
    let mut terminated = false;
    for token in line.split_whitespace() {
        if token=="-1" {
            itemsets.push(close_itemset(&mut pending)?);
        } else if token=="-2" {
            if !pending.is_empty() { itemsets.push(close_itemset(&mut pending)?); }
            terminated = true;
        } else if let Some(value) = token.strip_prefix("SUtility:") {
            fixed_utility = Some(parse_utility(value)?);
        } else if terminated {
            return Err(anyhow!("item token {:?} after the end of the sequence",token));
        } else {
            pending.push(parse_item_token(token)?);
        }
    }
    if !pending.is_empty() { itemsets.push(close_itemset(&mut pending)?); }
    if itemsets.is_empty() { return Err(anyhow!("sequence has no itemsets")); }
    Ok(Sequence::new(itemsets,fixed_utility))
}

/// Sort the collected items ascending (the miner relies on the order) and reject
/// an item occurring twice in one itemset.
fn close_itemset(pending:&mut Vec<(Item,Utility)>) -> anyhow::Result<Itemset> {
    if pending.is_empty() { return Err(anyhow!("empty itemset")); }
    pending.sort_by_key(|(item,_)|*item);
    for pair in pending.windows(2) {
        if pair[0].0==pair[1].0 { return Err(anyhow!("item {} occurs twice in one itemset",pair[0].0)); }
    }
    let itemset = Itemset::new(pending.iter().map(|(item,_)|*item).collect(),pending.iter().map(|(_,utility)|*utility).collect());
    pending.clear();
    Ok(itemset)
}

fn parse_item_token(token:&str) -> anyhow::Result<(Item,Utility)> {
    let (item_text,utility) = match token.split_once(':') {
        Some((item_text,utility_text)) => (item_text,parse_utility(utility_text)?),
        None => (token,DEFAULT_ITEM_UTILITY),
    };
    let item : Item = item_text.parse().map_err(|_|anyhow!("{:?} is not an item",item_text))?;
    if item.0==0 { return Err(anyhow!("items are positive integers, got 0")); }
    Ok((item,utility))
}

fn parse_utility(text:&str) -> anyhow::Result<Utility> {
    let utility : Utility = text.parse().map_err(|_|anyhow!("{:?} is not a utility",text))?;
    if !utility.is_finite()||utility<=0.0 { return Err(anyhow!("utilities are positive, got {}",utility)); }
    Ok(utility)
}
