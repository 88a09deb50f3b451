//! Per-request object and replica views.
//!
//! A data object is identified by its logical path. Its physical copies
//! (replicas) are tagged with the hierarchy path of the resource that stores
//! them. The view is a read-only snapshot fetched fresh for each request;
//! it is never cached across requests.

use crate::hierarchy::HierarchyPath;

/// Data operations the routing core distinguishes.
///
/// Write-variants and unlink are open-like for the purpose of operation-mode
/// inference: only `Create` is ever rewritten.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operation {
    Create,
    Open,
    Write,
    Unlink,
}

impl Operation {
    pub fn is_create(self) -> bool {
        matches!(self, Operation::Create)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Operation::Create => "create",
            Operation::Open => "open",
            Operation::Write => "write",
            Operation::Unlink => "unlink",
        };
        write!(f, "{}", s)
    }
}

/// Destination-resource hint keys, in fixed precedence order.
///
/// When several hints are present the first one in this order wins.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HintKey {
    BackupResc,
    DestResc,
    DefaultResc,
    RescName,
}

impl HintKey {
    /// Precedence order used everywhere hints are consulted.
    pub const PRECEDENCE: [HintKey; 4] = [
        HintKey::BackupResc,
        HintKey::DestResc,
        HintKey::DefaultResc,
        HintKey::RescName,
    ];
}

/// Destination-resource hints supplied by the client.
#[derive(Clone, Default, Debug)]
pub struct Hints {
    backup_resc: Option<String>,
    dest_resc: Option<String>,
    default_resc: Option<String>,
    resc_name: Option<String>,
}

impl Hints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: HintKey, value: impl Into<String>) {
        let slot = match key {
            HintKey::BackupResc => &mut self.backup_resc,
            HintKey::DestResc => &mut self.dest_resc,
            HintKey::DefaultResc => &mut self.default_resc,
            HintKey::RescName => &mut self.resc_name,
        };
        *slot = Some(value.into());
    }

    pub fn get(&self, key: HintKey) -> Option<&str> {
        let slot = match key {
            HintKey::BackupResc => &self.backup_resc,
            HintKey::DestResc => &self.dest_resc,
            HintKey::DefaultResc => &self.default_resc,
            HintKey::RescName => &self.resc_name,
        };
        slot.as_deref()
    }

    /// First hint present in precedence order, if any.
    pub fn destination(&self) -> Option<&str> {
        HintKey::PRECEDENCE.iter().find_map(|k| self.get(*k))
    }
}

/// Client input describing the object a request targets.
#[derive(Clone, Debug)]
pub struct ObjectDescriptor {
    /// Full logical path, e.g. `/tempZone/home/alice/file.dat`.
    pub logical_path: String,
    /// Destination-resource hints, if any.
    pub hints: Hints,
}

impl ObjectDescriptor {
    pub fn new(logical_path: impl Into<String>) -> Self {
        Self {
            logical_path: logical_path.into(),
            hints: Hints::new(),
        }
    }

    pub fn with_hint(mut self, key: HintKey, value: impl Into<String>) -> Self {
        self.hints.set(key, value);
        self
    }

    /// Logical path of the parent collection (final segment stripped).
    pub fn collection_path(&self) -> &str {
        match self.logical_path.rfind('/') {
            Some(0) | None => &self.logical_path,
            Some(pos) => &self.logical_path[..pos],
        }
    }
}

/// One physical copy of a data object.
#[derive(Clone, Debug)]
pub struct Replica {
    /// Hierarchy of the resource storing this copy.
    pub hierarchy: HierarchyPath,
    /// Catalog-assigned replica number.
    pub number: u32,
    /// Physical path on the storage medium, as reported by the catalog.
    pub physical_path: String,
}

impl Replica {
    pub fn new(hierarchy: HierarchyPath, number: u32, physical_path: impl Into<String>) -> Self {
        Self {
            hierarchy,
            number,
            physical_path: physical_path.into(),
        }
    }
}

/// Read-only snapshot of a data object's known replicas.
#[derive(Clone, Debug)]
pub struct ObjectView {
    logical_path: String,
    replicas: Vec<Replica>,
}

impl ObjectView {
    pub fn new(logical_path: impl Into<String>, replicas: Vec<Replica>) -> Self {
        Self {
            logical_path: logical_path.into(),
            replicas,
        }
    }

    pub fn logical_path(&self) -> &str {
        &self.logical_path
    }

    pub fn replicas(&self) -> &[Replica] {
        &self.replicas
    }

    /// True if any replica's hierarchy includes the named resource.
    pub fn has_replica_on(&self, resc_name: &str) -> bool {
        self.replicas.iter().any(|r| r.hierarchy.contains(resc_name))
    }
}
