use serde::{Deserialize, Serialize};
use std::{fmt, ops::Deref};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Default, Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub struct UserId(Uuid);

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl Deref for UserId {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::users::UserId;
    use uuid::uuid;

    #[test]
    fn conversion() {
        let id = uuid!("00000000-0000-0000-0000-000000000001");
        assert_eq!(*UserId::from(id), id);
    }

    #[test]
    fn display() {
        let id = UserId::from(uuid!("00000000-0000-0000-0000-000000000001"));
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000001");
    }
}
