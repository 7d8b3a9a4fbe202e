// Copyright 2025 the usrule-rs developers.
// A Rust implementation of utility-driven sequential rule mining,
// documented in https://arxiv.org/pdf/2111.15020.pdf
//
// This file is part of usrule-rs.
// usrule-rs is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// usrule-rs is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with usrule-rs.  If not, see <https://www.gnu.org/licenses/>.

pub mod parse_spmf_format;
pub mod write_rules;
