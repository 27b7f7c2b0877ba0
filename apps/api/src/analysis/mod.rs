// Resume scoring core: field extraction, TF-IDF features, random-forest scoring,
// rule-based adjustment, canned feedback and career matching.
// Handlers only reach the core through `service::AnalysisService`.

pub mod adjust;
pub mod artifact;
pub mod careers;
pub mod extractor;
pub mod feedback;
pub mod forest;
pub mod handlers;
pub mod scaler;
pub mod scorer;
pub mod service;
pub mod training_data;
pub mod vectorizer;
