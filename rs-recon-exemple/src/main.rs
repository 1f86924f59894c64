use log::info;
use rand::seq::IndexedRandom;

use rs_recon_core::corpus::Corpus;
use rs_recon_core::sketch::ngram::calc_ngram;
use rs_recon_core::sketch::overlap::{guess_zero_overlap, ZeroOverlapStrategy};
use rs_recon_core::sketch::similarity::{dice, guess_params};
use rs_recon_core::{enumerate_parallel, SearchParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Known plaintexts (tab separated, header line, uid in the last column)
    // A "known.bin" cache is written next to the file on first load
    let path = std::env::args().nth(1).unwrap_or_else(|| "./data/known.tsv".to_owned());
    let n = 2;
    let corpus = Corpus::load(&path, n)?;
    if corpus.is_empty() {
        return Err("The corpus is empty".into());
    }

    // Pick a random known plaintext and pretend we only see its similarities
    let target_text = corpus.texts().choose(&mut rand::rng()).ok_or("No target available")?;
    let target = calc_ngram(target_text, n);
    let sims = corpus.similarities(&target, dice);

    // What the best match tells about the unknown set size
    if let Some((best, sim)) = sims
        .iter()
        .enumerate()
        .filter(|(_, sim)| **sim < 1.0)
        .max_by(|a, b| a.1.total_cmp(b.1))
    {
        let sizes = guess_params(*sim, corpus.ngrams()[best].len(), 40);
        println!("Possible target sizes (from '{}'): {:?}", corpus.texts()[best], sizes);
    }

    // Remove every n-gram of the plaintexts that look disjoint from the target
    let strategy = ZeroOverlapStrategy::ratio_threshold(corpus.average_len());
    let excluded = guess_zero_overlap(&strategy, &sims, corpus.ngrams(), None, None)?;
    let graph = corpus.graph(&excluded)?;
    info!("{} n-grams excluded, {} contexts left", excluded.len(), graph.len());

    // Enumerate candidate reconstructions up to the target length
    let mut params = SearchParams::new(n, target_text.chars().count())?;
    params.workers = 0; // One worker per CPU

    // Stop pulling after a fixed budget, the enumeration is combinatorial
    let budget = 100_000;
    let mut ranked: Vec<(f64, String)> = enumerate_parallel(&graph, &params)
        .take(budget)
        .map(|sentence| {
            let sentence: String = sentence.into_iter().collect();
            let score = dice(&calc_ngram(&sentence, n), &target);
            (score, sentence)
        })
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

    println!("Target: {}", target_text);
    for (i, (score, sentence)) in ranked.iter().take(10).enumerate() {
        println!("Candidate {}: {} ({:.3})", i + 1, sentence, score);
    }

    Ok(())
}
