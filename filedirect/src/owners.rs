//! uid/gid name resolution backed by `/etc/passwd` and `/etc/group`.

use std::collections::HashMap;
use std::fs;

/// Lookup table mapping numeric ids to account names, loaded once per
/// listing or ownership operation.
#[derive(Debug, Default)]
pub struct OwnerDb {
    users: HashMap<u32, String>,
    groups: HashMap<u32, String>,
}

impl OwnerDb {
    pub fn load() -> OwnerDb {
        OwnerDb {
            users: parse_table(&fs::read_to_string("/etc/passwd").unwrap_or_default()),
            groups: parse_table(&fs::read_to_string("/etc/group").unwrap_or_default()),
        }
    }

    pub fn user_name(&self, uid: u32) -> Option<&str> {
        self.users.get(&uid).map(String::as_str)
    }

    pub fn group_name(&self, gid: u32) -> Option<&str> {
        self.groups.get(&gid).map(String::as_str)
    }

    pub fn user_id(&self, name: &str) -> Option<u32> {
        self.users
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(id, _)| *id)
    }

    pub fn group_id(&self, name: &str) -> Option<u32> {
        self.groups
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(id, _)| *id)
    }
}

/// Both files share the `name:x:id:...` colon layout in the fields we need.
fn parse_table(content: &str) -> HashMap<u32, String> {
    let mut table = HashMap::new();
    for line in content.lines() {
        if line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split(':').collect();
        if fields.len() < 3 {
            continue;
        }
        if let Ok(id) = fields[2].parse::<u32>() {
            table.entry(id).or_insert_with(|| fields[0].to_string());
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_passwd_layout() {
        let table = parse_table("root:x:0:0:root:/root:/bin/bash\n# comment\ndaemon:x:1:1::/:/usr/sbin/nologin\nbroken line\n");
        assert_eq!(table.get(&0).map(String::as_str), Some("root"));
        assert_eq!(table.get(&1).map(String::as_str), Some("daemon"));
        assert_eq!(table.len(), 2);
    }
}
