use std::{fs, time::Instant};

use log::info;

use geo_rank_core::{
    Error, RankOptions, Result, logging, rank, read_candidates_from_file,
    read_candidates_from_stdin, utils,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = RankOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");

    let (lat, lng) = options.origin()?;
    let candidates = match options.input_path() {
        Some(path) => read_candidates_from_file(path)?,
        None => read_candidates_from_stdin()?,
    };
    info!("input: n={}", candidates.len());
    let ranked = rank(lat, lng, candidates, &options.filters())?;

    let mut out = String::new();
    for result in &ranked {
        let line = serde_json::to_string(result)
            .map_err(|e| Error::invalid_data(format!("serializing result: {e}")))?;
        out.push_str(&line);
        out.push('\n');
    }
    match options.output_path() {
        Some(path) => fs::write(path, out)?,
        None => print!("{out}"),
    }

    info!(
        "output: n={} time={:.2}s",
        ranked.len(),
        now.elapsed().as_secs_f32()
    );

    utils::ranking_summary(&ranked);

    Ok(())
}
