use crate::pipeline::extraction::ExtractedDocument;

use super::SummarizingError;

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a medical assistant to a physician. \
Make sure to use technical terms specific to the medical field only.";

const INSTRUCTION_BLOCK: &str = r#"Your goal is to summarize the patient health records with the instructions
provided below to help the physician. Keep your summary succinct and to the point, do not make up information and only fetch
information that is present in the document.

Instructions:
Classify the input document as one of the three types: Prescription, Diagnosis, Lab Report. If the document does not fit into any of these three category, only output the type of the document with the description: Summary not available.

If the document is of the type:

Prescription: list out all the medications prescribed to the patient with their correct dosages

Diagnosis: list the all diagnosis given by the doctor

Lab Report: list out reported values of all parameters for the lab investigation. If there is any
abnormal values, report it. Use the bio reference interval provided in the document if given. Include details only about the investigation.
Do not give any notes or interpretations of your own.

"#;

/// Shape the model is asked to reproduce.
pub const OUTPUT_SCHEMA_EXAMPLE: &str = r#"{"summary":[{"filename":"value1","heading":"value2","subheading":"value3","date":"dd/mm/yyyy","pagenumber":1,"body":"value4"}]}"#;

const RULES_BLOCK: &str = r#"Every item in the json array has the following values:
'filename' to indicate which file the data has been extracted from.
'heading' can take one of the following values: Lab Report, Prescription, Diagnosis.
'subheading' indicates a larger data group that the data belongs to.
'date' the date of the document if available, in dd/mm/yyyy format.
'pagenumber' the page number of the document the information is extracted from.
'body' contains the main summary. Do not repeat any information that has been already been mentioned.
"#;

const DOCUMENTS_PREAMBLE: &str = "\nThe documents are provided in a json format with filename, \
pagenumber and content below separated by ###.\n###\n";

/// Build the user prompt for a batch of extracted documents.
///
/// Deterministic: the same documents always produce the same bytes.
pub fn build_summary_prompt(documents: &[ExtractedDocument]) -> Result<String, SummarizingError> {
    let serialized = serde_json::to_string(documents)?;

    let mut prompt = String::with_capacity(
        INSTRUCTION_BLOCK.len() + OUTPUT_SCHEMA_EXAMPLE.len() + RULES_BLOCK.len() + serialized.len() + 256,
    );
    prompt.push_str(INSTRUCTION_BLOCK);
    prompt.push_str("Give the summary as a json output with the following format:");
    prompt.push_str(OUTPUT_SCHEMA_EXAMPLE);
    prompt.push_str("\nHere are the rules for crafting the json response: ");
    prompt.push_str(RULES_BLOCK);
    prompt.push_str(DOCUMENTS_PREAMBLE);
    prompt.push_str(&serialized);
    Ok(prompt)
}
