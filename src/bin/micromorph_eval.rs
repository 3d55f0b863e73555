use micromorph::base::{ParamMicromorphic, Settings, StressConfiguration};
use micromorph::boundary::{evaluate_model, evaluate_model_with_jacobians, ModelInput};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing_subscriber::{fmt, EnvFilter};

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "micromorph_eval",
    about = "Evaluates the micromorphic linear elasticity model at one kinematic state"
)]
struct Options {
    /// JSON file with the parameters and the kinematic state
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Also compute the Jacobians
    #[structopt(short, long)]
    jacobians: bool,

    /// Report the stresses in the current configuration
    #[structopt(short, long)]
    current: bool,
}

/// Material parameters given either by name or in the flat host layout
#[derive(Deserialize)]
#[serde(untagged)]
enum Parameters {
    Named(ParamMicromorphic),
    Flat(Vec<f64>),
}

/// Holds the contents of the input file
#[derive(Deserialize)]
struct InputFile {
    parameters: Parameters,
    grad_u: [[f64; 3]; 3],
    phi: [f64; 9],
    grad_phi: [[f64; 3]; 9],
    #[serde(default)]
    settings: Settings,
}

/// Defines the errors of this program
#[derive(Debug, thiserror::Error)]
enum EvalError {
    #[error("cannot read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("evaluation failed: {0}")]
    Failed(String),
}

fn main() -> Result<(), EvalError> {
    // logging (set RUST_LOG=debug for details)
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();

    // parse options
    let options = Options::from_args();

    // load data
    let file = File::open(&options.input)?;
    let data: InputFile = serde_json::from_reader(BufReader::new(file))?;
    let fparams = match data.parameters {
        Parameters::Named(param) => param.to_flat(),
        Parameters::Flat(values) => values,
    };
    let mut input = ModelInput::new(fparams);
    input.set_state(&data.grad_u, &data.phi, &data.grad_phi);

    // settings
    let mut settings = data.settings;
    if options.current {
        settings.set_output(StressConfiguration::Current);
    }

    // evaluate
    let response = if options.jacobians {
        evaluate_model_with_jacobians(&input, &settings)
    } else {
        evaluate_model(&input, &settings)
    };

    // results
    match response.output() {
        Some(output) => {
            println!("{}", serde_json::to_string_pretty(output)?);
            Ok(())
        }
        None => Err(EvalError::Failed(response.message().to_string())),
    }
}
