use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

pub const INTENT_SCHEMA_FILE: &str = "deployment_intent_schema.json";
pub const SAMPLE_UTTERANCES_FILE: &str = "sample_utterance.txt";

const DEPLOYMENT_INTENT: &str = "DeploymentIntent";
const DEPLOYMENT_UTTERANCES: &[&str] = &[
    "what is the deployment status",
    "what is the status",
    "provide the deployment status",
];

/// The interaction model that needs to be uploaded alongside the sample skill.
#[derive(Debug, Serialize)]
pub struct IntentSchema {
    pub intents: Vec<IntentDefinition>,
}

#[derive(Debug, Serialize)]
pub struct IntentDefinition {
    pub intent: String,
    pub slots: Vec<SlotDefinition>,
}

#[derive(Debug, Serialize)]
pub struct SlotDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub slot_type: String,
}

pub fn intent_schema() -> IntentSchema {
    IntentSchema {
        intents: vec![IntentDefinition {
            intent: DEPLOYMENT_INTENT.into(),
            slots: Vec::new(),
        }],
    }
}

/// One utterance per line, prefixed with the intent it maps to.
pub fn sample_utterances() -> String {
    DEPLOYMENT_UTTERANCES
        .iter()
        .map(|utterance| format!("{DEPLOYMENT_INTENT} {utterance}\n"))
        .collect()
}

pub fn write(directory: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(directory)?;

    let schema = directory.join(INTENT_SCHEMA_FILE);
    info!(path = %schema.display(), "Writing intent schema");
    let mut content = serde_json::to_string_pretty(&intent_schema())?;
    content.push('\n');
    fs::write(schema, content)?;

    let utterances = directory.join(SAMPLE_UTTERANCES_FILE);
    info!(path = %utterances.display(), "Writing sample utterances");
    fs::write(utterances, sample_utterances())?;

    Ok(())
}
