//! Stub [`Host`] for unit tests.

use std::collections::HashMap;

use devcask_common::{DevcaskError, DevcaskResult, GroupRecord, Host, ProcessIds, UserRecord};

/// In-memory host: a fixed account database plus fixed process ids.
///
/// Defaults to an ordinary developer session: uid/gid 1000 ("dev"),
/// no supplementary groups beyond the primary one, empty environment.
pub(crate) struct MockHost {
    users: Vec<UserRecord>,
    groups: Vec<GroupRecord>,
    ids: ProcessIds,
    supplementary: Vec<u32>,
    env: HashMap<String, String>,
}

impl MockHost {
    pub(crate) fn new() -> Self {
        Self {
            users: vec![UserRecord {
                uid: 1000,
                name: "dev".to_string(),
                primary_gid: 1000,
            }],
            groups: vec![GroupRecord {
                gid: 1000,
                name: "dev".to_string(),
            }],
            ids: ProcessIds {
                real_uid: 1000,
                effective_uid: 1000,
                real_gid: 1000,
                effective_gid: 1000,
            },
            supplementary: vec![1000],
            env: HashMap::new(),
        }
    }

    pub(crate) fn with_user(mut self, uid: u32, name: &str, primary_gid: u32) -> Self {
        self.users.push(UserRecord {
            uid,
            name: name.to_string(),
            primary_gid,
        });
        self
    }

    pub(crate) fn with_group(mut self, gid: u32, name: &str) -> Self {
        self.groups.push(GroupRecord {
            gid,
            name: name.to_string(),
        });
        self
    }

    pub(crate) fn with_ids(
        mut self,
        real_uid: u32,
        effective_uid: u32,
        real_gid: u32,
        effective_gid: u32,
    ) -> Self {
        self.ids = ProcessIds {
            real_uid,
            effective_uid,
            real_gid,
            effective_gid,
        };
        self
    }

    pub(crate) fn with_supplementary(mut self, gids: &[u32]) -> Self {
        self.supplementary = gids.to_vec();
        self
    }

    pub(crate) fn with_env(mut self, name: &str, value: &str) -> Self {
        self.env.insert(name.to_string(), value.to_string());
        self
    }

    pub(crate) fn without_group(mut self, name: &str) -> Self {
        self.groups.retain(|g| g.name != name);
        self
    }
}

impl Host for MockHost {
    fn user_by_id(&self, uid: u32) -> DevcaskResult<UserRecord> {
        self.users
            .iter()
            .find(|u| u.uid == uid)
            .cloned()
            .ok_or_else(|| DevcaskError::UserNotFound {
                query: uid.to_string(),
            })
    }

    fn user_by_name(&self, name: &str) -> DevcaskResult<UserRecord> {
        self.users
            .iter()
            .find(|u| u.name == name)
            .cloned()
            .ok_or_else(|| DevcaskError::UserNotFound {
                query: name.to_string(),
            })
    }

    fn group_by_id(&self, gid: u32) -> DevcaskResult<GroupRecord> {
        self.groups
            .iter()
            .find(|g| g.gid == gid)
            .cloned()
            .ok_or_else(|| DevcaskError::GroupNotFound {
                query: gid.to_string(),
            })
    }

    fn group_by_name(&self, name: &str) -> DevcaskResult<GroupRecord> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .cloned()
            .ok_or_else(|| DevcaskError::GroupNotFound {
                query: name.to_string(),
            })
    }

    fn process_ids(&self) -> ProcessIds {
        self.ids
    }

    fn supplementary_groups(&self) -> DevcaskResult<Vec<u32>> {
        Ok(self.supplementary.clone())
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }
}
