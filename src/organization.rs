use core::fmt;

use serde::{Deserialize, Serialize};

/// Role a member holds inside an organization.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Capacity {
    Admin,
    Editor,
    #[default]
    Member,
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Admin => "admin",
                Self::Editor => "editor",
                Self::Member => "member",
            }
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Member {
    name: String,
    #[serde(default)]
    capacity: Capacity,
}

impl Member {
    pub fn new(name: String, capacity: Capacity) -> Self {
        Self { name, capacity }
    }
    pub fn get_name(&self) -> &String {
        &self.name
    }
    pub fn get_capacity(&self) -> Capacity {
        self.capacity
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    name: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    users: Vec<Member>,
}

impl Organization {
    pub fn new(name: String, display_name: String, users: Vec<Member>) -> Self {
        Self {
            name,
            display_name,
            users,
        }
    }
    pub fn get_name(&self) -> &String {
        &self.name
    }
    pub fn get_display_name(&self) -> &String {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
    pub fn get_users(&self) -> &Vec<Member> {
        &self.users
    }
    pub fn get_capacity_of(&self, user_name: &str) -> Option<Capacity> {
        self.users
            .iter()
            .find(|member| member.name == user_name)
            .map(|member| member.capacity)
    }
    /// Adds the user, or changes the capacity of an existing membership.
    pub fn upsert_member(&mut self, user_name: &str, capacity: Capacity) {
        match self.users.iter_mut().find(|member| member.name == user_name) {
            Some(member) => member.capacity = capacity,
            None => self
                .users
                .push(Member::new(user_name.to_owned(), capacity)),
        }
    }
    /// Copy without the member list, as returned when users are not requested.
    pub fn without_users(&self) -> Self {
        Self {
            name: self.name.to_owned(),
            display_name: self.display_name.to_owned(),
            users: Vec::new(),
        }
    }
}
