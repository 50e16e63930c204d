use serde::{Deserialize, Serialize};

/// One job posting as the extraction prompt asks the model to emit it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct JobPosting {
    pub company: String,
    pub location: String,
    pub role: String,
    pub experience: String,
    pub skills: Vec<String>,
    pub description: String,
}

impl JobPosting {
    pub const FIELDS: [&'static str; 6] = [
        "company",
        "location",
        "role",
        "experience",
        "skills",
        "description",
    ];
}
