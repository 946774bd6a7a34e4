use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use railtime_kinematics::RouteTimingSolver;
use railtime_timetable::{Consist, Route, Timetable, output_path};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uom::si::{f64::Time, time::second};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "railtime",
    about = "Generates a stop-to-stop timetable for a train consist over a route."
)]
struct Opt {
    /// Train consist description (.json)
    #[structopt(short, long, parse(from_os_str))]
    trainfile: PathBuf,

    /// Route table with 'track speed (mph)' and 'dist (mi)' columns (.csv)
    #[structopt(short, long, parse(from_os_str))]
    routefile: PathBuf,

    /// Dwell time at each stop, in seconds
    #[structopt(short, long, default_value = "120")]
    dwelltime: f64,

    /// Timetable to write; defaults to <route>_timetable.csv beside the route
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Log each timed segment
    #[structopt(short, long)]
    verbose: bool,
}

impl Opt {
    fn validate(&self) -> Result<()> {
        ensure!(
            has_extension(&self.trainfile, "json"),
            "--trainfile must be a .json file, got {}",
            self.trainfile.display()
        );
        ensure!(
            has_extension(&self.routefile, "csv"),
            "--routefile must be a .csv file, got {}",
            self.routefile.display()
        );
        ensure!(
            self.dwelltime.is_finite() && self.dwelltime >= 0.0,
            "--dwelltime must be a non-negative number of seconds, got {}",
            self.dwelltime
        );
        Ok(())
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| output_path(&self.routefile))
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Generates and writes the timetable, returning where it was written.
fn run(opt: &Opt) -> Result<PathBuf> {
    opt.validate()?;

    info!(
        train = %opt.trainfile.display(),
        route = %opt.routefile.display(),
        dwell_s = opt.dwelltime,
        "generating timetable",
    );

    let consist = Consist::from_path(&opt.trainfile)
        .with_context(|| format!("loading train consist {}", opt.trainfile.display()))?;
    let spec = consist
        .performance()
        .with_context(|| format!("invalid train consist {}", opt.trainfile.display()))?;
    let route = Route::from_path(&opt.routefile)
        .with_context(|| format!("loading route {}", opt.routefile.display()))?;

    let solver = RouteTimingSolver::new(&spec);
    let timetable = Timetable::generate(&solver, &route, Time::new::<second>(opt.dwelltime))
        .context("timing route")?;

    let output = opt.output_path();
    timetable
        .write_path(&output)
        .with_context(|| format!("writing timetable {}", output.display()))?;

    info!(output = %output.display(), "done");
    Ok(output)
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    init_logging(opt.verbose);
    run(&opt)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    const CONSIST: &str = r#"{
        "LeadingCoefDrag": 0.8,
        "PowerUnits": [
            { "Mass": 290000, "Height": 187.5, "Width": 123,
              "TractionPower": 3900, "TractionForce": 50000 }
        ],
        "TrailerCars": [ { "Mass": 740000, "Height": 170, "Width": 120 } ]
    }"#;

    fn opt(args: &[&str]) -> Opt {
        Opt::from_iter_safe(std::iter::once("railtime").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_short_and_long_flags() {
        let short = opt(&["-t", "a.json", "-r", "b.csv", "-d", "45", "-v"]);
        assert_eq!(short.trainfile, PathBuf::from("a.json"));
        assert_eq!(short.routefile, PathBuf::from("b.csv"));
        assert_eq!(short.dwelltime, 45.0);
        assert!(short.verbose);

        let long = opt(&["--trainfile", "a.json", "--routefile", "dir/b.csv"]);
        assert_eq!(long.dwelltime, 120.0);
        assert!(!long.verbose);
        assert_eq!(long.output_path(), PathBuf::from("dir/b_timetable.csv"));
    }

    #[test]
    fn requires_train_and_route() {
        let result = Opt::from_iter_safe(["railtime", "-t", "a.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_wrong_extensions_and_negative_dwell() {
        assert!(opt(&["-t", "a.json", "-r", "b.csv"]).validate().is_ok());
        assert!(opt(&["-t", "a.yaml", "-r", "b.csv"]).validate().is_err());
        assert!(opt(&["-t", "a.json", "-r", "b.txt"]).validate().is_err());
        assert!(opt(&["-t", "a.json", "-r", "b.csv", "--dwelltime=-5"]).validate().is_err());
    }

    #[test]
    fn writes_timetable_beside_route() {
        let dir = tempfile::tempdir().unwrap();
        let train = dir.path().join("train.json");
        let route = dir.path().join("line.csv");
        fs::write(&train, CONSIST).unwrap();
        fs::write(&route, "track speed (mph),dist (mi)\n0,0\n79,8\n").unwrap();

        let opt = opt(&[
            "-t",
            train.to_str().unwrap(),
            "-r",
            route.to_str().unwrap(),
        ]);
        let written = run(&opt).unwrap();

        assert_eq!(written, dir.path().join("line_timetable.csv"));
        let contents = fs::read_to_string(&written).unwrap();
        assert!(contents.starts_with("track speed (mph),dist (mi),time (min),avg spd (mph)\n"));
        assert_eq!(contents.lines().count(), 3);
    }

    #[test]
    fn malformed_route_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let train = dir.path().join("train.json");
        let route = dir.path().join("line.csv");
        fs::write(&train, CONSIST).unwrap();
        fs::write(&route, "track speed (mph),dist (mi)\n0,0\n0,8\n").unwrap();

        let opt = opt(&["-t", train.to_str().unwrap(), "-r", route.to_str().unwrap()]);
        let err = run(&opt).unwrap_err();
        assert!(err.to_string().contains("loading route"));
        assert!(!dir.path().join("line_timetable.csv").exists());
    }
}
