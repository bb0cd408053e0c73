//! Hourly wet-bulb temperature from surface reanalysis fields.
//!
//! Reads surface pressure, 2 m temperature and 2 m dewpoint, derives specific
//! humidity and then the adiabatic wet-bulb temperature with the
//! non-iterative (NEWT) method, converts it to degrees Celsius for
//! presentation and writes it once the whole field has been computed.

use log::info;
use thiserror::Error;

use crate::config::Config;
use crate::data_io::{Attributes, DataError, FieldSink, FieldSource};
use crate::parallel::ChunkExecutor;
use crate::pipeline::{
    AdiabaticWetBulbTemperature, KelvinToCelsius, MaterializeReport, Pipeline, PipelineError,
    SpecificHumidityFromDewpoint,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Outcome of [`hourly_wet_bulb`]
#[derive(Debug, Clone)]
pub struct WorkflowSummary {
    pub output: String,
    pub shape: Vec<usize>,
    pub undefined: usize,
    pub report: MaterializeReport,
}

/// Build the wet-bulb graph over `source`, materialize it and write the
/// result to `sink`.
///
/// Nothing is written unless every chunk succeeds.
pub fn hourly_wet_bulb<S, K>(
    source: &S,
    sink: &mut K,
    config: &Config,
    executor: &ChunkExecutor,
) -> Result<WorkflowSummary, WorkflowError>
where
    S: FieldSource + ?Sized,
    K: FieldSink + ?Sized,
{
    let names = &config.variables;
    let constants = &config.constants;

    let mut pipeline = Pipeline::new();
    let sp = pipeline.input(source.field(&names.pressure)?);
    let t2m = pipeline.input(source.field(&names.temperature)?);
    let d2m = pipeline.input(source.field(&names.dewpoint)?);

    let q = pipeline.register(
        SpecificHumidityFromDewpoint {
            constants: constants.clone(),
        },
        &[sp, d2m],
    )?;
    let tw = pipeline.register(
        AdiabaticWetBulbTemperature {
            constants: constants.clone(),
        },
        &[sp, t2m, q],
    )?;
    let tw_c = pipeline.register(
        KelvinToCelsius {
            constants: constants.clone(),
        },
        &[tw],
    )?;

    info!(
        "Wet-bulb graph built with {} nodes over {:?}",
        pipeline.len(),
        pipeline.geometry(tw_c)?.shape()
    );

    let materialized = pipeline.materialize(tw_c, executor)?;
    let field = materialized.array.rename(names.output.clone());

    let mut attributes = Attributes::new();
    attributes.insert(
        "data".to_string(),
        "wet bulb temperature from surface reanalysis".to_string(),
    );
    attributes.insert("method".to_string(), "NEWT".to_string());
    attributes.insert("unit".to_string(), field.units().to_string());

    let summary = WorkflowSummary {
        output: field.name().to_string(),
        shape: field.shape().to_vec(),
        undefined: field.count_undefined(),
        report: materialized.report,
    };

    sink.write(field, attributes)?;
    info!("Wrote '{}' {:?}", summary.output, summary.shape);

    Ok(summary)
}
