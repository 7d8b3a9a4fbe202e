// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use usrule::mining_algorithm::{mine, MinerParameters};
use usrule::sid_list::SidListRepresentation;
use utilities::parse_spmf_format;
use utilities::write_rules::RuleWriter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Mine high-utility sequential rules from a utility-annotated sequence database
struct CliOptions {
    /// The sequence database, one sequence per line
    input_file : PathBuf,
    /// The file to store the rules in. Default is the input file name, with path and extension if present removed and `_rules.txt` added.
    output_file : Option<PathBuf>,
    /// Emit rules with at least this exact utility. 0 is treated as 0.001 so that zero-utility rules are never enumerated.
    #[arg(long)]
    min_utility : f64,
    /// Emit rules with at least this confidence, a number in [0,1]
    #[arg(long)]
    min_confidence : f64,
    /// Largest number of items allowed in a rule antecedent
    #[arg(long, default_value_t = 4)]
    max_antecedent_size : usize,
    /// Largest number of items allowed in a rule consequent
    #[arg(long, default_value_t = 4)]
    max_consequent_size : usize,
    /// Read at most this many sequences from the input
    #[arg(long)]
    max_sequence_count : Option<usize>,
    /// Use sorted-array sid lists instead of the default bitset ones
    #[arg(long)]
    sorted_array_sid_lists : bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = CliOptions::parse();
    let database = parse_spmf_format::parse_file(&args.input_file,args.max_sequence_count.unwrap_or(usize::MAX))?;
    let parameters = MinerParameters{
        minimum_utility : args.min_utility,
        minimum_confidence : args.min_confidence,
        maximum_antecedent_size : args.max_antecedent_size,
        maximum_consequent_size : args.max_consequent_size,
        sid_list_representation : if args.sorted_array_sid_lists { SidListRepresentation::SortedArray } else { SidListRepresentation::Bitset },
    };
    let output_file : PathBuf = args.output_file.unwrap_or_else(||{
        let mut stem = args.input_file.file_stem().map(|s|PathBuf::from(s)).unwrap_or_else(||PathBuf::from("output"));
        stem.as_mut_os_string().push("_rules.txt");
        stem
    });
    let mut writer = RuleWriter::new(BufWriter::new(File::create(&output_file)?));
    let statistics = mine(database,&parameters,&mut writer)?;
    writer.finish()?;
    log::debug!("statistics: {:?}",statistics);
    println!("{} rules written to {}",statistics.rule_count,output_file.display());
    Ok(())
}
