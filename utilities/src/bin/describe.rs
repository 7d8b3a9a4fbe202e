// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.



use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use usrule::sequences::SequenceDatabase;
use utilities::parse_spmf_format;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// This reads a sequence database and prints a summary of it as JSON
struct CliOptions {
    /// The sequence database, one sequence per line
    input_file : PathBuf,
}

#[derive(Serialize)]
struct DatabaseSummary {
    sequence_count : usize,
    distinct_item_count : usize,
    itemset_count : usize,
    total_utility : f64,
    longest_sequence : usize,
}

impl DatabaseSummary {
    fn new(database:&SequenceDatabase) -> DatabaseSummary {
        let mut items = HashSet::new();
        let mut itemset_count = 0;
        let mut longest_sequence = 0;
        for (_,sequence) in database.iter() {
            itemset_count+=sequence.itemsets.len();
            longest_sequence = longest_sequence.max(sequence.itemsets.len());
            for item in sequence.items() { items.insert(item); }
        }
        DatabaseSummary{
            sequence_count : database.len(),
            distinct_item_count : items.len(),
            itemset_count,
            total_utility : database.total_utility(),
            longest_sequence,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = CliOptions::parse();
    let database = parse_spmf_format::parse_file(&args.input_file,usize::MAX)?;
    println!("{}",serde_json::to_string_pretty(&DatabaseSummary::new(&database))?);
    Ok(())
}
