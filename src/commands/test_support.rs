use crate::domain::model::{OrganizationFields, SpaceFields};
use crate::domain::ports::{ConfigReader, Ui};
use crate::requirements::{Requirement, RequirementFactory};
use crate::utils::error::{CfError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct RecordingUi {
    lines: Mutex<Vec<String>>,
}

impl RecordingUi {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    fn push(&self, line: String) {
        self.lines.lock().unwrap().push(line);
    }
}

impl Ui for RecordingUi {
    fn say(&self, message: &str) {
        self.push(message.to_string());
    }

    fn ok(&self) {
        self.push("OK".to_string());
    }

    fn warn(&self, message: &str) {
        self.push(format!("WARN {}", message));
    }

    fn failed(&self, message: &str) {
        self.push(format!("FAILED {}", message));
    }

    fn failed_with_usage(&self, command: &str, usage: &str) {
        self.push(format!("USAGE {}: {}", command, usage));
    }
}

pub struct MockConfig {
    pub endpoint: String,
    pub token: String,
    pub org: Option<OrganizationFields>,
    pub space: Option<SpaceFields>,
}

impl ConfigReader for MockConfig {
    fn api_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn access_token(&self) -> &str {
        &self.token
    }

    fn username(&self) -> &str {
        "admin"
    }

    fn organization_fields(&self) -> Option<&OrganizationFields> {
        self.org.as_ref()
    }

    fn space_fields(&self) -> Option<&SpaceFields> {
        self.space.as_ref()
    }
}

/// Logged in, with org `acme` and space `dev` targeted.
pub fn targeted_config() -> MockConfig {
    MockConfig {
        endpoint: "https://api.example.com".to_string(),
        token: "bearer abc".to_string(),
        org: Some(OrganizationFields {
            name: "acme".to_string(),
            guid: "org-guid".to_string(),
        }),
        space: Some(SpaceFields {
            name: "dev".to_string(),
            guid: "space-guid".to_string(),
        }),
    }
}

struct CountingRequirement {
    passes: bool,
    checks: Arc<AtomicUsize>,
}

impl Requirement for CountingRequirement {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn check(&self) -> Result<()> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        if self.passes {
            Ok(())
        } else {
            Err(CfError::RequirementFailed {
                requirement: "counting",
                message: "requirement not met".to_string(),
            })
        }
    }
}

/// Hands out requirements that all pass or all fail, counting checks.
pub struct CountingFactory {
    passes: bool,
    checks: Arc<AtomicUsize>,
}

impl CountingFactory {
    pub fn passing() -> Self {
        Self {
            passes: true,
            checks: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            passes: false,
            checks: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    fn requirement(&self) -> Box<dyn Requirement> {
        Box::new(CountingRequirement {
            passes: self.passes,
            checks: Arc::clone(&self.checks),
        })
    }
}

impl RequirementFactory for CountingFactory {
    fn new_api_endpoint_requirement(&self) -> Box<dyn Requirement> {
        self.requirement()
    }

    fn new_login_requirement(&self) -> Box<dyn Requirement> {
        self.requirement()
    }

    fn new_targeted_organization_requirement(&self) -> Box<dyn Requirement> {
        self.requirement()
    }

    fn new_targeted_space_requirement(&self) -> Box<dyn Requirement> {
        self.requirement()
    }
}
