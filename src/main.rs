use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use num_bigint::BigUint;
use num_traits::One;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pvss::randutil::sample_below;
use pvss::verify::check_decrypted_share_in_box;
use pvss::{
    distribute, reconstruct_secret, setup_p256, setup_ristretto, verify_decrypted_share, verify_distribution_shares,
    Group, GroupParameters, Participant,
};

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Curve {
    P256,
    Ristretto,
}

impl Curve {
    fn name(&self) -> &'static str {
        match self {
            Curve::P256 => "p256",
            Curve::Ristretto => "ristretto",
        }
    }
}

#[derive(Parser)]
#[command(name = "pvss-bench")]
#[command(about = "Time one PVSS round per phase: distribute, verify, extract, verify decryption, reconstruct")]
struct Cli {
    /// Curve backend; both when omitted
    #[arg(short, long)]
    curve: Option<Curve>,

    /// Repetitions averaged per configuration
    #[arg(short, long, default_value = "10")]
    reps: usize,

    /// Number of recipients; sweeps 8..128 when omitted
    #[arg(short = 'n', long)]
    recipients: Option<usize>,

    /// Shares needed to reconstruct; defaults to recipients/2. Needs --recipients
    #[arg(short, long)]
    threshold: Option<usize>,
}

#[derive(Default, Clone, Debug)]
struct Timings {
    total: Duration,
    keygen: Duration,
    distribute: Duration,
    verify: Duration,
    extract: Duration,
    verify_dec: Duration,
    reconstruct: Duration,
}

impl Timings {
    fn accumulate(&mut self, o: &Timings) {
        self.total += o.total;
        self.keygen += o.keygen;
        self.distribute += o.distribute;
        self.verify += o.verify;
        self.extract += o.extract;
        self.verify_dec += o.verify_dec;
        self.reconstruct += o.reconstruct;
    }

    fn average(&self, n: usize) -> Timings {
        Timings {
            total: avg(self.total, n),
            keygen: avg(self.keygen, n),
            distribute: avg(self.distribute, n),
            verify: avg(self.verify, n),
            extract: avg(self.extract, n),
            verify_dec: avg(self.verify_dec, n),
            reconstruct: avg(self.reconstruct, n),
        }
    }
}

fn avg(d: Duration, n: usize) -> Duration {
    if n == 0 {
        d
    } else {
        Duration::from_nanos((d.as_nanos() / n as u128) as u64)
    }
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1e3
}

fn run_once<G: Group>(params: &GroupParameters<G>, n: usize, t: usize) -> pvss::Result<(Timings, bool)> {
    let total_start = Instant::now();
    let mut tm = Timings::default();

    let start = Instant::now();
    let people: Vec<Participant> = (0..n).map(|_| Participant::generate(params)).collect();
    let pks: Vec<Vec<u8>> = people.iter().map(|p| p.public_key().to_vec()).collect();
    tm.keygen = start.elapsed();

    let secret = sample_below(&(BigUint::one() << 256));

    let start = Instant::now();
    let dbox = distribute(params, &secret, &pks, t)?;
    tm.distribute = start.elapsed();

    let start = Instant::now();
    let ok_box = verify_distribution_shares(params, &dbox);
    tm.verify = start.elapsed();

    let start = Instant::now();
    let decs = people
        .iter()
        .map(|p| p.extract_share(params, &dbox))
        .collect::<pvss::Result<Vec<_>>>()?;
    tm.extract = start.elapsed();

    let start = Instant::now();
    let ok_dec = decs
        .iter()
        .all(|d| verify_decrypted_share(params, d) && check_decrypted_share_in_box(params, &dbox, d).is_ok());
    tm.verify_dec = start.elapsed();

    let start = Instant::now();
    let recovered = reconstruct_secret(params, &decs[..t], &dbox.u)?;
    tm.reconstruct = start.elapsed();

    tm.total = total_start.elapsed();
    Ok((tm, ok_box && ok_dec && recovered == secret))
}

fn run_exp<G: Group>(params: &GroupParameters<G>, curve: Curve, n: usize, t: usize, reps: usize) -> pvss::Result<()> {
    let mut sum = Timings::default();
    let mut ok = true;

    for _ in 0..reps {
        let (tm, good) = run_once(params, n, t)?;
        ok &= good;
        sum.accumulate(&tm);
    }
    let avg = sum.average(reps);

    info!(curve = curve.name(), n, t, ok, "configuration done");
    println!(
        "RESULT,curve={},n={},t={},reps={},ok={},total_ms={:.3},keygen_ms={:.3},distribute_ms={:.3},verify_ms={:.3},extract_ms={:.3},verify_dec_ms={:.3},reconstruct_ms={:.3}",
        curve.name(),
        n,
        t,
        reps,
        ok,
        ms(avg.total),
        ms(avg.keygen),
        ms(avg.distribute),
        ms(avg.verify),
        ms(avg.extract),
        ms(avg.verify_dec),
        ms(avg.reconstruct),
    );
    Ok(())
}

fn configurations(cli: &Cli) -> Vec<(usize, usize)> {
    match cli.recipients {
        Some(n) => vec![(n, cli.threshold.unwrap_or((n / 2).max(1)))],
        None => {
            let mut out: Vec<(usize, usize)> = [8, 16, 32, 64, 128].iter().map(|&n| (n, n / 2)).collect();
            out.extend([1, 4, 8, 16, 32].iter().map(|&t| (64, t)));
            out
        }
    }
}

fn run_curve<G: Group>(params: &GroupParameters<G>, curve: Curve, cli: &Cli) -> pvss::Result<()> {
    for (n, t) in configurations(cli) {
        run_exp(params, curve, n, t, cli.reps)?;
    }
    Ok(())
}

fn run(cli: &Cli) -> pvss::Result<()> {
    if cli.recipients.is_none() {
        if let Some(t) = cli.threshold {
            warn!(threshold = t, "--threshold ignored without --recipients; running the sweep");
        }
    }
    let curves = match cli.curve {
        Some(c) => vec![c],
        None => vec![Curve::P256, Curve::Ristretto],
    };
    for curve in curves {
        match curve {
            Curve::P256 => run_curve(&setup_p256()?, curve, cli)?,
            Curve::Ristretto => run_curve(&setup_ristretto()?, curve, cli)?,
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pvss=info")))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "benchmark aborted");
            ExitCode::FAILURE
        }
    }
}
