use std::collections::HashMap;

pub const PAGE_DATA: &str = "page_data";
pub const QUESTION: &str = "question";

pub const NOT_FOUND_ANSWER: &str = "I could not find relevant information.";

const EXTRACT_TEXT: &str = r#"
    ### SCRAPED TEXT FROM WEBSITE:
    {page_data}
    ### INSTRUCTION:
    The scraped text is from the career's page of a website.
    Your job is to extract the job postings and return them in JSON format containing the
    following keys: company, location, role, experience, skills and description.
    Only return the valid JSON.
    ### VALID JSON (NO PREAMBLE):
    "#;

const QA_TEXT: &str = r#"
    ### SCRAPED TEXT FROM WEBSITE:
    {page_data}
    ### USER'S QUESTION:
    {question}
    ### INSTRUCTION:
    Based on the provided scraped text, generate a precise and informative response to the user's question.
    If the answer is not found in the text, respond with "I could not find relevant information."
    ### ANSWER:
    "#;

pub const EXTRACT: PromptTemplate = PromptTemplate {
    name: "extract",
    text: EXTRACT_TEXT,
    slots: &[PAGE_DATA],
};

pub const QA: PromptTemplate = PromptTemplate {
    name: "qa",
    text: QA_TEXT,
    slots: &[PAGE_DATA, QUESTION],
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PromptError {
    #[error("prompt template {template:?} is missing a value for {slot:?}")]
    MissingSlot {
        template: &'static str,
        slot: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Extract,
    Qa,
}

impl PromptKind {
    pub fn template(self) -> &'static PromptTemplate {
        match self {
            PromptKind::Extract => &EXTRACT,
            PromptKind::Qa => &QA,
        }
    }
}

/// Slot name to value. Values are inserted verbatim.
#[derive(Debug, Clone, Default)]
pub struct PromptRequest {
    slots: HashMap<&'static str, String>,
}

impl PromptRequest {
    pub fn new() -> PromptRequest {
        PromptRequest::default()
    }

    pub fn with(mut self, slot: &'static str, value: impl Into<String>) -> PromptRequest {
        self.slots.insert(slot, value.into());
        self
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub text: &'static str,
    pub slots: &'static [&'static str],
}

impl PromptTemplate {
    /// Substitutes every `{slot}` placeholder in one pass over the template.
    /// Inserted values are never scanned again, so page text that happens to
    /// contain `{question}` stays as is.
    pub fn render(&self, request: &PromptRequest) -> Result<String, PromptError> {
        for slot in self.slots {
            if request.get(slot).is_none() {
                return Err(PromptError::MissingSlot {
                    template: self.name,
                    slot: *slot,
                });
            }
        }

        let extra: usize = self
            .slots
            .iter()
            .filter_map(|s| request.get(s))
            .map(str::len)
            .sum();
        let mut out = String::with_capacity(self.text.len() + extra);
        let mut rest = self.text;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let placeholder = after
                .find('}')
                .map(|close| &after[..close])
                .filter(|name| self.slots.contains(name));

            match placeholder {
                Some(name) => {
                    out.push_str(request.get(name).unwrap_or_default());
                    rest = &after[name.len() + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);

        Ok(out)
    }
}
