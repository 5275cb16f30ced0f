use serde::{Deserialize, Serialize};

/// A platform account as seen by this extension: identity plus the sysadmin flag.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    name: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    sysadmin: bool,
}

impl User {
    pub fn new(name: String, display_name: String, sysadmin: bool) -> Self {
        Self {
            name,
            display_name,
            sysadmin,
        }
    }
    pub fn get_name(&self) -> &String {
        &self.name
    }
    /// Falls back to the user name when no display name was set.
    pub fn get_display_name(&self) -> &String {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
    pub fn is_sysadmin(&self) -> bool {
        self.sysadmin
    }
}
