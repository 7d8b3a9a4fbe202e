// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.


//! Sets of sequence identifiers
//!
//! Intersections dominate the cost of deep left expansion, so the engine normally
//! uses the bitset representation. A sorted array representation is available for
//! sparse id spaces. The two are observably identical and are never mixed in a run.


use std::cell::Cell;
use bit_set::BitSet;
use serde::Deserialize;
use serde::Serialize;
use crate::sequences::SequenceId;

/// Which concrete representation a mining run uses for its sid lists.
#[derive(Clone,Copy,PartialEq,Eq,Debug,Default,Serialize,Deserialize)]
pub enum SidListRepresentation {
    #[default]
    Bitset,
    SortedArray,
}

/// A set of sequence ids.
#[derive(Clone,Debug)]
pub enum SidList {
    Bitset(BitsetSidList),
    SortedArray(ArraySidList),
}

/// One bit per sequence id. The cardinality is memoised when first needed.
#[derive(Clone,Debug,Default)]
pub struct BitsetSidList {
    bits : BitSet,
    cached_size : Cell<Option<usize>>,
}

/// An ascending array of sequence ids.
#[derive(Clone,Debug,Default)]
pub struct ArraySidList {
    sids : Vec<usize>,
}

impl ArraySidList {
    fn add(&mut self,sid:usize) {
        match self.sids.last() {
            Some(&last) if last==sid => {}
            Some(&last) if last<sid => self.sids.push(sid),
            _ => {
                if let Err(position) = self.sids.binary_search(&sid) {
                    self.sids.insert(position,sid);
                }
            }
        }
    }
}

impl SidList {
    pub fn new(representation:SidListRepresentation) -> SidList {
        match representation {
            SidListRepresentation::Bitset => SidList::Bitset(BitsetSidList::default()),
            SidListRepresentation::SortedArray => SidList::SortedArray(ArraySidList::default()),
        }
    }

    pub fn representation(&self) -> SidListRepresentation {
        match self {
            SidList::Bitset(_) => SidListRepresentation::Bitset,
            SidList::SortedArray(_) => SidListRepresentation::SortedArray,
        }
    }

    pub fn add(&mut self,sid:SequenceId) {
        match self {
            SidList::Bitset(list) => {
                list.bits.insert(sid.0);
                list.cached_size.set(None);
            }
            SidList::SortedArray(list) => list.add(sid.0),
        }
    }

    pub fn contains(&self,sid:SequenceId) -> bool {
        match self {
            SidList::Bitset(list) => list.bits.contains(sid.0),
            SidList::SortedArray(list) => list.sids.binary_search(&sid.0).is_ok(),
        }
    }

    /// Number of ids in the set.
    pub fn size(&self) -> usize {
        match self {
            SidList::Bitset(list) => {
                if let Some(size) = list.cached_size.get() { size } else {
                    let size = list.bits.len();
                    list.cached_size.set(Some(size));
                    size
                }
            }
            SidList::SortedArray(list) => list.sids.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.size()==0 }

    pub fn intersection(&self,other:&SidList) -> SidList {
        match (self,other) {
            (SidList::Bitset(a),SidList::Bitset(b)) => {
                let mut bits = a.bits.clone();
                bits.intersect_with(&b.bits);
                SidList::Bitset(BitsetSidList{bits,cached_size:Cell::new(None)})
            }
            (SidList::SortedArray(a),SidList::SortedArray(b)) => {
                // binary search of the smaller list against the larger one
                let (small,large) = if a.sids.len()<=b.sids.len() {(a,b)} else {(b,a)};
                let sids = small.sids.iter().copied().filter(|sid|large.sids.binary_search(sid).is_ok()).collect();
                SidList::SortedArray(ArraySidList{sids})
            }
            // a run never mixes representations
            _ => {
                let mut result = SidList::new(self.representation());
                for sid in self.iter() {
                    if other.contains(sid) { result.add(sid); }
                }
                result
            }
        }
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item=SequenceId> + '_> {
        match self {
            SidList::Bitset(list) => Box::new(list.bits.iter().map(SequenceId)),
            SidList::SortedArray(list) => Box::new(list.sids.iter().map(|&sid|SequenceId(sid))),
        }
    }
}
