use sea_orm::entity::prelude::*;

/// Lifecycle flag shared by wishlists and their items.
///
/// `Deleted` is part of the stored enumeration but delete operations remove
/// rows outright; the flag only changes through an explicit update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum Status {
    #[sea_orm(num_value = 1)]
    Active,
    #[sea_orm(num_value = 0)]
    Deleted,
}

impl Status {
    pub const CODES: [i32; 2] = [1, 0];

    pub fn code(self) -> i32 {
        match self {
            Status::Active => 1,
            Status::Deleted => 0,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Status::Active),
            0 => Some(Status::Deleted),
            _ => None,
        }
    }
}
