//! # config
//!
//! Session credentials and options

use crate::dirent::MIN_RECORD_LEN;
use crate::{SmbError, SmbResult};

/// Default capacity of the scratch buffer filled with packed dirents
pub const DEFAULT_DIRENT_BUFFER_SIZE: usize = 1024;

/// Credentials used to address and authenticate against a server
#[derive(Debug, Default, Clone)]
pub struct SmbCredentials {
    pub(crate) server: String,
    pub(crate) share: String,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) workgroup: Option<String>,
}

impl SmbCredentials {
    /// Construct SmbCredentials with the provided server (`smb://address[:port]`)
    pub fn server<S: AsRef<str>>(mut self, server: S) -> Self {
        self.server = server.as_ref().to_string();
        self
    }

    /// Construct SmbCredentials with the provided share
    pub fn share<S: AsRef<str>>(mut self, share: S) -> Self {
        self.share = share.as_ref().to_string();
        self
    }

    /// Construct SmbCredentials with the provided username
    pub fn username<S: AsRef<str>>(mut self, username: S) -> Self {
        self.username = Some(username.as_ref().to_string());
        self
    }

    /// Construct SmbCredentials with the provided password
    pub fn password<S: AsRef<str>>(mut self, password: S) -> Self {
        self.password = Some(password.as_ref().to_string());
        self
    }

    /// Construct SmbCredentials with the provided workgroup
    pub fn workgroup<S: AsRef<str>>(mut self, workgroup: S) -> Self {
        self.workgroup = Some(workgroup.as_ref().to_string());
        self
    }

    pub fn get_server(&self) -> &str {
        &self.server
    }

    pub fn get_share(&self) -> &str {
        &self.share
    }

    pub fn get_username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn get_password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn get_workgroup(&self) -> Option<&str> {
        self.workgroup.as_deref()
    }

    pub(crate) fn validate(&self) -> SmbResult<()> {
        match self.server.strip_prefix("smb://") {
            Some(address) if !address.trim_matches('/').is_empty() => Ok(()),
            Some(_) => Err(SmbError::Configuration(String::from(
                "server address is empty",
            ))),
            None => Err(SmbError::Configuration(format!(
                "server address must use the smb:// scheme: '{}'",
                self.server
            ))),
        }
    }
}

/// Session options
#[derive(Debug, Clone)]
pub struct SmbOptions {
    pub(crate) case_sensitive: bool,
    pub(crate) one_share_per_server: bool,
    pub(crate) no_auto_anonymous_login: bool,
    pub(crate) dirent_buffer_size: usize,
}

impl Default for SmbOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            one_share_per_server: false,
            no_auto_anonymous_login: false,
            dirent_buffer_size: DEFAULT_DIRENT_BUFFER_SIZE,
        }
    }
}

impl SmbOptions {
    /// Treat names on the server as case sensitive
    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    /// Reuse one connection for all the shares of a server
    pub fn one_share_per_server(mut self, value: bool) -> Self {
        self.one_share_per_server = value;
        self
    }

    /// Don't fall back to an anonymous login when authentication fails
    pub fn no_auto_anonymous_login(mut self, value: bool) -> Self {
        self.no_auto_anonymous_login = value;
        self
    }

    /// Capacity in bytes of the buffer each directory fill writes packed records into
    pub fn dirent_buffer_size(mut self, size: usize) -> Self {
        self.dirent_buffer_size = size;
        self
    }

    pub fn get_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn get_one_share_per_server(&self) -> bool {
        self.one_share_per_server
    }

    pub fn get_no_auto_anonymous_login(&self) -> bool {
        self.no_auto_anonymous_login
    }

    pub fn get_dirent_buffer_size(&self) -> usize {
        self.dirent_buffer_size
    }

    pub(crate) fn validate(&self) -> SmbResult<()> {
        if self.dirent_buffer_size < MIN_RECORD_LEN {
            return Err(SmbError::Configuration(format!(
                "dirent buffer size {} is smaller than a record ({MIN_RECORD_LEN} bytes)",
                self.dirent_buffer_size
            )));
        }
        Ok(())
    }
}
