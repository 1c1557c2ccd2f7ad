mod healthcheck;
mod healthchecks;
mod run;

pub use healthcheck::{
    Detection, Healthcheck, HealthcheckError, HealthcheckFailure, HealthcheckSeverity,
};
pub use healthchecks::version::{VersionHealthcheck, TRACKED_DEPENDENCIES};
pub use run::{FixOutcome, HealthcheckReport, Reporter, RunHealthchecks};
