use std::{fs::File, io::BufReader, path::PathBuf, str::FromStr};

use anyhow::{bail, Context as _};
use hitscore_core::{
    display::DisplayMode,
    format,
    judgment::{best_judgment, judgment_color},
    score::RawScore,
};
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(
    name = "judge-score",
    about = "Prints the judgment a config gives to cut scores."
)]
struct Opt {
    /// Path to a config file.
    config: PathBuf,
    /// Cut scores as `before,after,cut-distance`, e.g. `70,30,15`.
    #[structopt(required = true)]
    scores: Vec<Score>,
}

struct Score(RawScore);

impl FromStr for Score {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|part| part.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("invalid score {s:?}"))?;

        match parts[..] {
            [before_cut, after_cut, cut_distance] => {
                Ok(Score(RawScore::new(before_cut, after_cut, cut_distance)))
            }
            _ => bail!("expected three comma-separated numbers, got {s:?}"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();

    let file = File::open(&opt.config)
        .with_context(|| format!("couldn't open {}", opt.config.display()))?;
    let config = hitscore_config::from_reader(BufReader::new(file))
        .context("couldn't parse the config")?;
    config.validate().context("the config is invalid")?;

    let judgments = config.judgment_table();
    let segments = config.segment_tables();
    let mode = DisplayMode::from(config.display_mode);

    for Score(score) in opt.scores {
        let total = score.total();
        print!("{total}\t{:.2}%", score.percentage());

        let Some(index) = best_judgment(&judgments, total) else {
            println!("\tno judgments");
            continue;
        };
        let judgment = &judgments[index];
        print!("\t{}", judgment.threshold);

        match judgment_color(&judgments, index, total) {
            Some(color) => print!(
                "\t{:.3} {:.3} {:.3} {:.3}",
                color.r, color.g, color.b, color.a
            ),
            None => print!("\t-"),
        }

        let text = judgment.text.as_deref().unwrap_or_default();
        if mode.expands_format() {
            println!("\t{:?}", format::expand(text, score, &segments));
        } else {
            println!("\t{text:?}");
        }
    }

    Ok(())
}
