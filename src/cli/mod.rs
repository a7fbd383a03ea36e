//! CLI module for Medbot
//!
//! Provides subcommands for the two process roles:
//! - `serve`: run the chat HTTP service
//! - `ingest`: load a PDF corpus into the vector index

pub mod ingest;
pub mod serve;

use clap::{Parser, Subcommand};

/// Medbot - retrieval-augmented medical Q&A service
#[derive(Parser)]
#[command(name = "medbot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the chat HTTP service
    Serve,

    /// Load PDFs from a directory, chunk, embed and upsert into the index
    Ingest(ingest::IngestArgs),
}
