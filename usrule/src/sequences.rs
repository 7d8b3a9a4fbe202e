// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.


//! The types making up a utility-annotated sequence database
//!
//! Many of these are wrappers around integers, used to prevent e.g. confusing an item
//! identifier with a sequence identifier. Rust allows zero cost abstractions for such
//! wrappers, so there is little reason not to use them.


use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use serde::Deserialize;
use serde::Serialize;

/// The utility (profit, weight) of an item occurrence, and sums thereof.
pub type Utility = f64;

/// An item, identified by a positive integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Item(pub u32);
// type alias really, don't want long display
impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
// type alias really, don't want long display
impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}

impl FromStr for Item {
    type Err = <u32 as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Item(u32::from_str(s)?))
    }
}

/// A sequence, referred to by position in the database, 0 being first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SequenceId(pub usize);
// type alias really, don't want long display
impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
// type alias really, don't want long display
impl fmt::Debug for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "s{}", self.0) }
}

/// Distinct items observed together, each with the utility of its occurrence.
/// Items are sorted ascending; several scans in the mining engine rely on that order.
#[derive(Clone,Debug,Serialize,Deserialize)]
pub struct Itemset {
    pub items : Vec<Item>,
    pub utilities : Vec<Utility>,
}

impl Itemset {
    pub fn new(items:Vec<Item>,utilities:Vec<Utility>) -> Itemset {
        Itemset{items,utilities}
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn utility(&self) -> Utility { self.utilities.iter().sum() }
}

/// An ordered list of itemsets with an exact utility.
///
/// The exact utility is normally the sum of the per-item utilities, but an input
/// file may fix a different value for the whole sequence.
#[derive(Clone,Debug,Serialize,Deserialize)]
pub struct Sequence {
    pub itemsets : Vec<Itemset>,
    exact_utility : Utility,
}

impl Sequence {
    pub fn new(itemsets:Vec<Itemset>,exact_utility:Option<Utility>) -> Sequence {
        let exact_utility = exact_utility.unwrap_or_else(||itemsets.iter().map(|s|s.utility()).sum());
        Sequence{itemsets,exact_utility}
    }

    pub fn exact_utility(&self) -> Utility { self.exact_utility }

    pub fn is_empty(&self) -> bool { self.itemsets.is_empty() }

    pub fn contains(&self,item:Item) -> bool {
        self.itemsets.iter().any(|s|s.items.contains(&item))
    }

    /// Every item occurrence in sequence order. The mining engine assumes an item
    /// occurs at most once per sequence.
    pub fn items(&self) -> impl Iterator<Item=Item> + '_ {
        self.itemsets.iter().flat_map(|s|s.items.iter().copied())
    }

    /// Remove every occurrence of the given items, dropping itemsets this empties.
    /// Returns the total utility removed; the exact utility drops by the same amount.
    pub fn remove_items(&mut self,doomed:&HashSet<Item>) -> Utility {
        let mut removed = 0.0;
        for itemset in &mut self.itemsets {
            let mut position = 0;
            while position<itemset.items.len() {
                if doomed.contains(&itemset.items[position]) {
                    removed+=itemset.utilities[position];
                    itemset.items.remove(position);
                    itemset.utilities.remove(position);
                } else { position+=1; }
            }
        }
        self.itemsets.retain(|s|!s.is_empty());
        self.exact_utility-=removed;
        removed
    }
}

/// The in-memory sequence database. Sequence ids are positions in the vector;
/// they are only frozen once preprocessing has finished mutating the database.
#[derive(Clone,Debug,Default,Serialize,Deserialize)]
pub struct SequenceDatabase {
    pub sequences : Vec<Sequence>,
}

impl SequenceDatabase {
    pub fn new(sequences:Vec<Sequence>) -> SequenceDatabase {
        SequenceDatabase{sequences}
    }

    pub fn len(&self) -> usize { self.sequences.len() }

    pub fn is_empty(&self) -> bool { self.sequences.is_empty() }

    pub fn sequence(&self,sid:SequenceId) -> &Sequence { &self.sequences[sid.0] }

    pub fn exact_utility(&self,sid:SequenceId) -> Utility { self.sequences[sid.0].exact_utility }

    pub fn total_utility(&self) -> Utility { self.sequences.iter().map(|s|s.exact_utility).sum() }

    pub fn iter(&self) -> impl Iterator<Item=(SequenceId,&Sequence)> {
        self.sequences.iter().enumerate().map(|(position,sequence)|(SequenceId(position),sequence))
    }

    /// Remove a single item occurrence, dropping the itemset if that empties it.
    /// The sequence itself stays in place even if it empties, so ids remain stable
    /// until remove_empty_sequences is called. Returns the utility removed.
    pub fn remove_item(&mut self,sid:SequenceId,itemset_position:usize,item_position:usize) -> Utility {
        let sequence = &mut self.sequences[sid.0];
        let itemset = &mut sequence.itemsets[itemset_position];
        let utility = itemset.utilities.remove(item_position);
        itemset.items.remove(item_position);
        if itemset.is_empty() { sequence.itemsets.remove(itemset_position); }
        sequence.exact_utility-=utility;
        utility
    }

    /// Bulk form of remove_item used by the preprocessor. Returns the sequences
    /// that lost items together with the utility each of them lost.
    pub fn remove_items(&mut self,doomed:&HashSet<Item>) -> Vec<(SequenceId,Utility)> {
        let mut mutated = vec![];
        for (position,sequence) in self.sequences.iter_mut().enumerate() {
            let removed = sequence.remove_items(doomed);
            if removed>0.0 { mutated.push((SequenceId(position),removed)); }
        }
        mutated
    }

    pub fn remove_empty_sequences(&mut self) {
        self.sequences.retain(|s|!s.is_empty());
    }
}
