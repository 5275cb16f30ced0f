use std::{io, net::AddrParseError, path::PathBuf};

use axum::http::header::InvalidHeaderValue;
use thiserror::Error;

use crate::authorization::Capability;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unauthorized({capability}, {resource:?})")]
pub struct Unauthorized {
    pub capability: Capability,
    pub resource: Option<String>,
}

impl Unauthorized {
    pub fn new(capability: Capability, resource: Option<&str>) -> Self {
        Self {
            capability,
            resource: resource.map(str::to_owned),
        }
    }
}

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("OrganizationNotFound({0})")]
    OrganizationNotFound(String),
    #[error("UserNotFound({0})")]
    UserNotFound(String),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("UnknownTemplate({0})")]
    UnknownTemplate(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Read({0:?}, {1})")]
    Read(PathBuf, io::Error),
    #[error("Parse({0:?}, {1})")]
    Parse(PathBuf, toml::de::Error),
    #[error("InvalidBindAddress({0}, {1})")]
    InvalidBindAddress(AddrParseError, String),
    #[error("InvalidOrigin({0}, {1})")]
    InvalidOrigin(InvalidHeaderValue, String),
    #[error("DuplicateUser({0})")]
    DuplicateUser(String),
    #[error("DuplicateOrganization({0})")]
    DuplicateOrganization(String),
}

#[derive(Error, Debug)]
pub enum AdminServerBuildError {
    #[error("MissingProperties({0})")]
    MissingProperties(String),
    #[error("Bind({0})")]
    Bind(io::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Platform({0})")]
    Platform(#[from] PlatformError),
    #[error("Render({0})")]
    Render(#[from] RenderError),
    #[error("Config({0})")]
    Config(#[from] ConfigError),
    #[error("AdminServerBuild({0})")]
    AdminServerBuild(#[from] AdminServerBuildError),
}
