pub mod progress;

use crate::bert::BertStats;

pub fn print_banner() {
    println!("pnbert-rs");
}

/// Same layout as the classic BERT result dump
pub fn print_results(stats: &BertStats) {
    println!("-------------------------------");
    println!("BERT Results (PN{}):", stats.order);
    println!("{}", stats);
}
