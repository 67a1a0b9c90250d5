//! Sea-ORM entities for the bookings and comments tables.

use crate::models::{Booking, BookingStatus, Comment, NewBookingRecord, NewCommentRecord};

pub mod booking {
    use sea_orm::entity::prelude::*;
    use sea_orm::ActiveValue::{NotSet, Set};
    use serde::{Deserialize, Serialize};

    use super::{Booking, BookingStatus, NewBookingRecord};

    /// The `start`/`end` fields map to `start_date`/`end_date` columns
    /// since END is reserved in SQL.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "bookings")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(column_name = "start_date")]
        pub start: DateTimeWithTimeZone,
        #[sea_orm(column_name = "end_date")]
        pub end: DateTimeWithTimeZone,
        pub item_id: i64,
        pub booker_id: i64,
        pub status: BookingStatus,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for Booking {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                start: model.start.into(),
                end: model.end.into(),
                item_id: model.item_id,
                booker_id: model.booker_id,
                status: model.status,
            }
        }
    }

    impl From<NewBookingRecord> for ActiveModel {
        fn from(record: NewBookingRecord) -> Self {
            ActiveModel {
                id: NotSet,
                start: Set(record.start.into()),
                end: Set(record.end.into()),
                item_id: Set(record.item_id),
                booker_id: Set(record.booker_id),
                status: Set(record.status),
            }
        }
    }
}

pub mod comment {
    use sea_orm::entity::prelude::*;
    use sea_orm::ActiveValue::{NotSet, Set};
    use serde::{Deserialize, Serialize};

    use super::{Comment, NewCommentRecord};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "comments")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(column_type = "Text")]
        pub text: String,
        pub item_id: i64,
        pub author_id: i64,
        pub created: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for Comment {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                text: model.text,
                item_id: model.item_id,
                author_id: model.author_id,
                created: model.created.into(),
            }
        }
    }

    impl From<NewCommentRecord> for ActiveModel {
        fn from(record: NewCommentRecord) -> Self {
            ActiveModel {
                id: NotSet,
                text: Set(record.text),
                item_id: Set(record.item_id),
                author_id: Set(record.author_id),
                created: Set(record.created.into()),
            }
        }
    }
}
