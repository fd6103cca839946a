pub mod client;
pub mod config;
pub mod controller;
pub mod credentials;
pub mod debounce;
pub mod query;
pub mod scroll;
pub mod session;
pub mod testing;

pub use client::{
    HttpSearchClient, MovieSummary, PageRequest, SearchClient, SearchError, SearchPage, PAGE_SIZE,
};
pub use config::{
    load_config, load_config_from_str, validate_config, ApiConfig, Config, ConfigError,
    SanitizedConfig, StorageConfig,
};
pub use controller::{
    AggregatedResultState, DisplayStatus, ResultSnapshot, SearchController, Settlement,
};
pub use credentials::{
    current_screen, sign_in, sign_out, CredentialError, CredentialProvider, CredentialStore,
    Credentials, FileCredentialStore, MemoryCredentialStore, Screen, SignInError,
    StaticCredentials,
};
pub use debounce::{Debouncer, Scheduler, TaskHandle, TokioScheduler, DEBOUNCE_DELAY};
pub use query::{parse_year_filter, QueryError, QueryParameters, TitleType, Year, YEAR_OPTIONS};
pub use scroll::{ScrollTrigger, ViewportPosition, ViewportSignal, SCROLL_THRESHOLD};
pub use session::SearchSession;
