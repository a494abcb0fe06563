// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the derivate command-line interface.
//!
//! Four subcommands: `build` turns a JSON source into a `d_<lang>.dat`
//! resource, `inspect` shows what a resource holds, `find` looks words up in a
//! single resource file, and `lookup` goes through the service the way an
//! application would, driven by a config file.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use derivate::{Compression, Lang};

#[derive(Parser)]
#[command(
    name = "derivate",
    about = "Build and query lazily loaded derivation dictionaries",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a dictionary resource from a JSON source
    Build {
        /// Source file with `language` and `groups`
        #[arg(short, long)]
        input: PathBuf,

        /// Output resource, conventionally d_<lang>.dat
        #[arg(short, long)]
        output: PathBuf,

        /// Container compression (gzip or brotli)
        #[arg(long, default_value = "gzip")]
        compression: Compression,
    },

    /// Inspect a dictionary resource
    Inspect {
        /// Path to the resource
        file: PathBuf,
    },

    /// Look words up in a dictionary resource
    Find {
        /// Path to the resource
        file: PathBuf,

        /// Words to look up (upper-cased before lookup)
        #[arg(required = true)]
        words: Vec<String>,

        /// Only keep groups holding the word in this language
        #[arg(long)]
        lang: Option<Lang>,

        /// Decode the whole resource up front
        #[arg(long)]
        eager: bool,

        /// Disable the double-Н rewrite
        #[arg(long)]
        no_create: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look words up through the derivation service
    Lookup {
        /// Service configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Words to look up (upper-cased before lookup)
        #[arg(required = true)]
        words: Vec<String>,

        /// Restrict to one language
        #[arg(long)]
        lang: Option<Lang>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
}
