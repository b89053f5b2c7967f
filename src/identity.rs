//! Owner and group name lookup

use std::cell::RefCell;
use std::collections::HashMap;

use nix::unistd::{Gid, Group, Uid, User};

/// Maps numeric ids to names from some identity database.
///
/// `None` means the id is unknown. Whether that is an error is the caller's
/// decision.
pub trait NameLookup {
    fn user_name(&self, uid: u32) -> Option<String>;
    fn group_name(&self, gid: u32) -> Option<String>;
}

/// Lookup against the system password and group databases.
///
/// Results are memoized; a tree usually has very few distinct owners.
#[derive(Debug, Default)]
pub struct SystemNames {
    users: RefCell<HashMap<u32, Option<String>>>,
    groups: RefCell<HashMap<u32, Option<String>>>,
}

impl SystemNames {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NameLookup for SystemNames {
    fn user_name(&self, uid: u32) -> Option<String> {
        self.users
            .borrow_mut()
            .entry(uid)
            .or_insert_with(|| {
                User::from_uid(Uid::from_raw(uid))
                    .ok()
                    .flatten()
                    .map(|user| user.name)
            })
            .clone()
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        self.groups
            .borrow_mut()
            .entry(gid)
            .or_insert_with(|| {
                Group::from_gid(Gid::from_raw(gid))
                    .ok()
                    .flatten()
                    .map(|group| group.name)
            })
            .clone()
    }
}
