//! Prompt templates for the MCP server.

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

impl PromptTemplate {
    /// Substitutes `{name}` placeholders; missing optional arguments become
    /// `default_for_missing`.
    pub fn apply<'a, F>(&self, lookup: F, default_for_missing: &str) -> Result<String, String>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut text = self.template.clone();
        for arg in &self.arguments {
            let value = match lookup(&arg.name) {
                Some(value) => value,
                None if arg.required => {
                    return Err(format!("Required argument '{}' is missing", arg.name))
                }
                None => default_for_missing,
            };
            text = text.replace(&format!("{{{}}}", arg.name), value);
        }
        Ok(text)
    }
}

/// Predefined prompt templates for working through approvals.
pub fn prompt_templates() -> Vec<PromptTemplate> {
    vec![PromptTemplate {
        name: "review_inbox".to_string(),
        description: "Walk through pending HR approvals one by one using hrflow's tools".to_string(),
        template: r#"You are helping an HR approver work through their pending approvals.

# Focus
{focus}

# Step 1: Load the Inbox
Call `list_pending_approvals`. If it is empty, say so and stop.

# Step 2: Review Each Item
For each approval, in the order listed:
1. Call `show_request` with the item's request ID.
2. Summarize the request: type, requester, what is being asked for, and any
   attached documents.
3. Show where the approval chain stands. Point out which levels have already
   approved and any comments they left.
4. Flag anything that blocks approval. An account request needs a `contract`
   document before Manager HR can approve it.

# Step 3: Ask Before Deciding
Never approve or reject on your own. Present your summary and ask the
approver whether to approve, reject, or skip. Ask for comments, which are
required in practice when rejecting.

# Step 4: Submit the Decision
Call `approve` or `reject` with the approval ID and comments. If the tool
returns an error, show the message exactly as returned and do not retry
unless the approver asks you to.

# Step 5: Wrap Up
After the last item, list what was approved, rejected and skipped."#
            .to_string(),
        arguments: vec![PromptTemplateArg {
            name: "focus".to_string(),
            description: "Optional focus, e.g. a request type such as 'promotion'".to_string(),
            required: false,
        }],
    }]
}
