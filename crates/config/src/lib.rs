pub mod settings;

pub use settings::{
    AppSettings, ModelBackendSettings, ModelSettings, PipelineSettings, Settings,
};
