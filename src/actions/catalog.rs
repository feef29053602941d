//! Action catalog
//!
//! Display metadata for every action a rules-engine host can register.
//! Nothing here affects how an action runs.

/// Transport an action runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Sftp,
    Ftp,
}

/// Where a parameter's value comes from in an [`ActionRequest`](super::ActionRequest).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    Host,
    Credentials,
    KeyCredentials,
    /// A named entry in the request's `params` table
    Named,
}

#[derive(Debug, Clone, Copy)]
pub struct ParamDescriptor {
    pub name: &'static str,
    pub source: ParamSource,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ActionDescriptor {
    pub name: &'static str,
    pub protocol: Protocol,
    pub display_name: &'static str,
    /// Sentence shown in the host's designer, `{param}` placeholders in order
    pub template: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamDescriptor],
}

impl ActionDescriptor {
    pub fn named_params(&self) -> impl Iterator<Item = &'static str> {
        self.params
            .iter()
            .filter(|p| p.source == ParamSource::Named)
            .map(|p| p.name)
    }

    pub fn needs_key_credentials(&self) -> bool {
        self.params
            .iter()
            .any(|p| p.source == ParamSource::KeyCredentials)
    }
}

const SOURCE_DIR: ParamDescriptor = ParamDescriptor {
    name: "source_dir",
    source: ParamSource::Named,
    description: "Local folder holding the file, e.g. D:/outbox/",
};
const REMOTE_SOURCE_DIR: ParamDescriptor = ParamDescriptor {
    name: "source_dir",
    source: ParamSource::Named,
    description: "Remote folder holding the file, e.g. /outbox/",
};
const FILE: ParamDescriptor = ParamDescriptor {
    name: "file",
    source: ParamSource::Named,
    description: "File name without folder",
};
const DEST_DIR: ParamDescriptor = ParamDescriptor {
    name: "dest_dir",
    source: ParamSource::Named,
    description: "Remote folder, e.g. /inbox/",
};
const DEST_PATH: ParamDescriptor = ParamDescriptor {
    name: "dest_path",
    source: ParamSource::Named,
    description: "Full local path to write the downloaded file to",
};
const PRIVATE_KEY_PATH: ParamDescriptor = ParamDescriptor {
    name: "private_key_path",
    source: ParamSource::Named,
    description: "Path to a PEM private key file",
};
const HOST: ParamDescriptor = ParamDescriptor {
    name: "host",
    source: ParamSource::Host,
    description: "Server as host or host:port",
};
const CREDENTIALS: ParamDescriptor = ParamDescriptor {
    name: "credentials",
    source: ParamSource::Credentials,
    description: "Login username and password",
};
const KEY_CREDENTIALS: ParamDescriptor = ParamDescriptor {
    name: "key_credentials",
    source: ParamSource::KeyCredentials,
    description: "Credential whose password decrypts the private key",
};
const KEY_OWNER: ParamDescriptor = ParamDescriptor {
    name: "credentials",
    source: ParamSource::Credentials,
    description: "Username, with the private key passphrase as password",
};

pub static CATALOG: &[ActionDescriptor] = &[
    ActionDescriptor {
        name: "sftp.send",
        protocol: Protocol::Sftp,
        display_name: "Send file via SFTP",
        template: "Send {source_dir} {file} to {dest_dir} on {host} with {credentials}",
        description: "Upload a local file over SFTP and confirm it was written",
        params: &[SOURCE_DIR, FILE, DEST_DIR, HOST, CREDENTIALS],
    },
    ActionDescriptor {
        name: "sftp.send_with_key_auth",
        protocol: Protocol::Sftp,
        display_name: "Send file via SFTP with password or key",
        template: "Send {source_dir} {file} to {dest_dir} on {host} with {credentials} or {private_key_path} unlocked by {key_credentials}",
        description: "Upload over SFTP offering both password and private key authentication",
        params: &[
            SOURCE_DIR,
            FILE,
            DEST_DIR,
            HOST,
            CREDENTIALS,
            PRIVATE_KEY_PATH,
            KEY_CREDENTIALS,
        ],
    },
    ActionDescriptor {
        name: "sftp.send_with_private_key_only",
        protocol: Protocol::Sftp,
        display_name: "Send file via SFTP with private key",
        template: "Send {source_dir} {file} to {dest_dir} on {host} with key {private_key_path} as {credentials}",
        description: "Upload over SFTP authenticating with a PEM private key only",
        params: &[
            SOURCE_DIR,
            FILE,
            DEST_DIR,
            HOST,
            PRIVATE_KEY_PATH,
            KEY_OWNER,
        ],
    },
    ActionDescriptor {
        name: "sftp.exists",
        protocol: Protocol::Sftp,
        display_name: "Check if file exists via SFTP",
        template: "Check if {file} exists in {dest_dir} on {host} with {credentials}",
        description: "Report whether a remote file exists",
        params: &[FILE, DEST_DIR, HOST, CREDENTIALS],
    },
    ActionDescriptor {
        name: "sftp.delete",
        protocol: Protocol::Sftp,
        display_name: "Delete file via SFTP",
        template: "Delete {file} in {dest_dir} on {host} with {credentials}",
        description: "Delete a remote file; false when it does not exist",
        params: &[FILE, DEST_DIR, HOST, CREDENTIALS],
    },
    ActionDescriptor {
        name: "sftp.download",
        protocol: Protocol::Sftp,
        display_name: "Download file from SFTP",
        template: "Download {file} from {source_dir} on {host} to {dest_path} with {credentials}",
        description: "Download a remote file to a local path",
        params: &[FILE, REMOTE_SOURCE_DIR, HOST, DEST_PATH, CREDENTIALS],
    },
    ActionDescriptor {
        name: "ftp.send",
        protocol: Protocol::Ftp,
        display_name: "Send file via FTP",
        template: "Send {source_dir} {file} to {dest_dir} on {host} with {credentials}",
        description: "Upload a local file over plain FTP",
        params: &[SOURCE_DIR, FILE, DEST_DIR, HOST, CREDENTIALS],
    },
    ActionDescriptor {
        name: "ftp.download",
        protocol: Protocol::Ftp,
        display_name: "Download file from FTP",
        template: "Download {file} from {source_dir} on {host} to {dest_path} with {credentials}",
        description: "Download a remote file over plain FTP to a local path",
        params: &[FILE, REMOTE_SOURCE_DIR, HOST, DEST_PATH, CREDENTIALS],
    },
    ActionDescriptor {
        name: "ftp.exists",
        protocol: Protocol::Ftp,
        display_name: "Check if file exists via FTP",
        template: "Check if {file} exists in {dest_dir} on {host} with {credentials}",
        description: "Report whether a remote file exists using a SIZE query",
        params: &[FILE, DEST_DIR, HOST, CREDENTIALS],
    },
    ActionDescriptor {
        name: "ftp.delete",
        protocol: Protocol::Ftp,
        display_name: "Delete file via FTP",
        template: "Delete {file} in {dest_dir} on {host} with {credentials}",
        description: "Delete a remote file; true only on a 250 reply",
        params: &[FILE, DEST_DIR, HOST, CREDENTIALS],
    },
];

pub fn find_action(name: &str) -> Option<&'static ActionDescriptor> {
    CATALOG.iter().find(|action| action.name == name)
}
