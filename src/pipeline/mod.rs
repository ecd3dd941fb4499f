//! Fixture generation: the reference and transform dumpers.

mod config;
mod reference;
mod transforms;

pub use config::{
    FixturePaths, Stage, TransformConfig, DEFAULT_INPUT, DEFAULT_REFERENCE, DEFAULT_SIZE,
    REFERENCE_FILE_NAME, SAMPLES_DIR,
};
pub use reference::dump_reference;
pub use transforms::{dump_transforms, run_stages, DumpReport};
