// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.


//! The two sid list representations must behave identically.


use usrule::sequences::SequenceId;
use usrule::sid_list::{SidList, SidListRepresentation};

const REPRESENTATIONS : [SidListRepresentation;2] = [SidListRepresentation::Bitset,SidListRepresentation::SortedArray];

fn filled(representation:SidListRepresentation,sids:&[usize]) -> SidList {
    let mut list = SidList::new(representation);
    for &sid in sids { list.add(SequenceId(sid)); }
    list
}

#[test]
fn add_size_contains() {
    for representation in REPRESENTATIONS {
        let list = filled(representation,&[4,1,9,4,1]);
        assert_eq!(3,list.size());
        assert_eq!(3,list.size()); // the bitset memoises; asking twice must not change anything
        assert!(list.contains(SequenceId(1)));
        assert!(list.contains(SequenceId(4)));
        assert!(list.contains(SequenceId(9)));
        assert!(!list.contains(SequenceId(0)));
        assert!(!list.contains(SequenceId(5)));
    }
}

#[test]
fn iteration_is_ascending() {
    for representation in REPRESENTATIONS {
        let list = filled(representation,&[7,2,5,0]);
        let sids : Vec<usize> = list.iter().map(|sid|sid.0).collect();
        assert_eq!(vec![0,2,5,7],sids);
    }
}

#[test]
fn intersection() {
    for representation in REPRESENTATIONS {
        let a = filled(representation,&[0,2,4,6,8]);
        let b = filled(representation,&[1,2,3,4,9]);
        let both = a.intersection(&b);
        assert_eq!(2,both.size());
        assert!(both.contains(SequenceId(2)));
        assert!(both.contains(SequenceId(4)));
        assert!(!both.contains(SequenceId(0)));
        let empty = a.intersection(&filled(representation,&[]));
        assert_eq!(0,empty.size());
        assert!(empty.is_empty());
    }
}

#[test]
/// Adding after a size query invalidates the memoised cardinality.
fn size_after_mutation() {
    for representation in REPRESENTATIONS {
        let mut list = filled(representation,&[1,2]);
        assert_eq!(2,list.size());
        list.add(SequenceId(5));
        assert_eq!(3,list.size());
        list.add(SequenceId(5));
        assert_eq!(3,list.size());
    }
}
