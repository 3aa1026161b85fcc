//! Generic create/list/get/update/delete lifecycle shared by every resource.
//!
//! A [`Resource`] supplies the entity, its request draft and rule set, the
//! defaults injected on create, the fields pinned on update and the
//! ownership predicate. [`EntityService`] runs the lifecycle and returns
//! either the rendered view or the ordered [`ErrorStack`] of the call.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ColumnType, Condition, DatabaseConnection,
    DbErr, EntityTrait, IdenStatic, IntoActiveModel, Iterable, ModelTrait, Order, QueryFilter,
    QueryOrder, QuerySelect, Value as DbValue,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{
    error::{ErrorEntry, ErrorStack, ServiceResult},
    routes::params::{ListQuery, ORDER_PARAM, SortOrder},
    services::ownership::Owner,
    validation::{RuleGroup, Validate},
};

pub const CREATION_DATE: &str = "creation_date";

pub type ColumnOf<R> = <<R as Resource>::Entity as EntityTrait>::Column;

#[async_trait]
pub trait Resource: Send + Sync + 'static {
    type Entity: EntityTrait<Model = Self::Model, ActiveModel = Self::ActiveModel>;
    type Model: ModelTrait<Entity = Self::Entity>
        + IntoActiveModel<Self::ActiveModel>
        + Clone
        + Send
        + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + Sync + 'static;
    type Draft: DeserializeOwned + Validate + Send + Sync;
    type View: From<Self::Model> + Serialize + Send;

    const NAME: &'static str;
    /// Reported when get or update cannot see the row.
    const NOT_FOUND: &'static str;
    /// Reported when delete cannot see the row.
    const DELETE_FAILED: &'static str;

    fn id_column() -> ColumnOf<Self>;

    fn id_of(model: &Self::Model) -> i32;

    /// Rows the owner may see. AND-ed into every lookup.
    fn visible_to(owner: &Owner) -> Condition;

    /// Injected on create; these win over body fields.
    fn defaults(_owner: &Owner) -> Map<String, Value> {
        Map::new()
    }

    /// Pinned on update next to the route id; these win over body fields.
    fn pins(_owner: &Owner) -> Map<String, Value> {
        Map::new()
    }

    fn build(draft: Self::Draft) -> Self::ActiveModel;

    /// Copies the mutable fields present in `draft` onto `active`.
    fn apply(draft: Self::Draft, active: &mut Self::ActiveModel);

    /// Relation check on a deserialized draft, run before anything is written.
    async fn admits(
        _db: &DatabaseConnection,
        _owner: &Owner,
        _draft: &Self::Draft,
    ) -> Result<Option<ErrorEntry>, DbErr> {
        Ok(None)
    }
}

/// One lifecycle call for resource `R` on behalf of `owner`.
pub struct EntityService<'a, R: Resource> {
    db: &'a DatabaseConnection,
    owner: Owner,
    resource: PhantomData<R>,
}

impl<'a, R: Resource> EntityService<'a, R> {
    pub fn new(db: &'a DatabaseConnection, owner: Owner) -> Self {
        Self {
            db,
            owner,
            resource: PhantomData,
        }
    }

    pub async fn create(&self, body: Value) -> ServiceResult<R::View> {
        let mut payload = into_object(body)?;
        payload.extend(R::defaults(&self.owner));
        payload.insert(
            CREATION_DATE.to_string(),
            Value::String(Utc::now().fixed_offset().to_rfc3339()),
        );

        let draft: R::Draft = decode(payload)?;
        self.validated(&draft, RuleGroup::Create)?;
        self.admitted(&draft).await?;

        let model = R::build(draft)
            .insert(self.db)
            .await
            .map_err(|err| self.persistence("create", err))?;
        tracing::info!(resource = R::NAME, id = R::id_of(&model), "created");
        Ok(model.into())
    }

    pub async fn list(&self, query: &ListQuery) -> ServiceResult<Vec<R::View>> {
        let mut errors = ErrorStack::new();

        let mut condition = R::visible_to(&self.owner);
        for (key, raw) in &query.filters {
            let Some(column) = column_named::<R>(key) else {
                errors.push(ErrorEntry::field(key, format!("Unknown filter field '{key}'")));
                continue;
            };
            match filter_value(&column, raw) {
                Some(value) => condition = condition.add(column.eq(value)),
                None => errors.push(ErrorEntry::field(
                    key,
                    format!("Invalid value '{raw}' for filter '{key}'"),
                )),
            }
        }

        let mut select = R::Entity::find().filter(condition);
        for sort in &query.order {
            let Some(column) = column_named::<R>(&sort.field) else {
                errors.push(ErrorEntry::field(
                    ORDER_PARAM,
                    format!("Unknown sort field '{}'", sort.field),
                ));
                continue;
            };
            select = select.order_by(column, order_of(sort.order));
        }

        if !errors.is_empty() {
            tracing::debug!(resource = R::NAME, %errors, "list criteria rejected");
            return Err(errors);
        }

        let per_page = query.per_page.max(0) as u64;
        let offset = (query.page.max(0) as u64).saturating_mul(per_page);
        let rows = select
            .order_by(R::id_column(), Order::Asc)
            .limit(per_page)
            .offset(offset)
            .all(self.db)
            .await
            .map_err(|err| self.persistence("list", err))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i32) -> ServiceResult<R::View> {
        match self.find_visible(id).await? {
            Some(model) => Ok(model.into()),
            None => Err(self.refused(R::NOT_FOUND, id)),
        }
    }

    pub async fn update(&self, id: i32, body: Value) -> ServiceResult<R::View> {
        let mut payload = into_object(body)?;
        payload.insert("id".to_string(), Value::from(id));
        payload.extend(R::pins(&self.owner));

        let draft: R::Draft = decode(payload)?;
        let Some(existing) = self.find_visible(id).await? else {
            return Err(self.refused(R::NOT_FOUND, id));
        };
        self.admitted(&draft).await?;
        self.validated(&draft, RuleGroup::Update)?;

        let mut active: R::ActiveModel = existing.clone().into_active_model();
        R::apply(draft, &mut active);
        if !active.is_changed() {
            return Ok(existing.into());
        }

        let model = active
            .update(self.db)
            .await
            .map_err(|err| self.persistence("update", err))?;
        tracing::info!(resource = R::NAME, id, "updated");
        Ok(model.into())
    }

    /// Hard delete. Missing and foreign rows report the same message.
    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        let Some(existing) = self.find_visible(id).await? else {
            return Err(self.refused(R::DELETE_FAILED, id));
        };
        let active: R::ActiveModel = existing.into_active_model();
        active
            .delete(self.db)
            .await
            .map_err(|err| self.persistence("delete", err))?;
        tracing::info!(resource = R::NAME, id, "deleted");
        Ok(())
    }

    async fn find_visible(&self, id: i32) -> ServiceResult<Option<R::Model>> {
        R::Entity::find()
            .filter(R::visible_to(&self.owner))
            .filter(R::id_column().eq(id))
            .one(self.db)
            .await
            .map_err(|err| self.persistence("lookup", err))
    }

    fn validated(&self, draft: &R::Draft, group: RuleGroup) -> ServiceResult<()> {
        let violations = draft.validate(group);
        if violations.is_empty() {
            return Ok(());
        }
        let errors = ErrorStack::from_violations(violations);
        tracing::debug!(resource = R::NAME, ?group, %errors, "validation failed");
        Err(errors)
    }

    async fn admitted(&self, draft: &R::Draft) -> ServiceResult<()> {
        match R::admits(self.db, &self.owner, draft).await {
            Ok(None) => Ok(()),
            Ok(Some(entry)) => {
                let errors = ErrorStack::from(entry);
                tracing::debug!(
                    resource = R::NAME,
                    user_id = self.owner.user_id,
                    %errors,
                    "relation check failed"
                );
                Err(errors)
            }
            Err(err) => Err(self.persistence("relation check", err)),
        }
    }

    fn refused(&self, message: &str, id: i32) -> ErrorStack {
        tracing::debug!(
            resource = R::NAME,
            id,
            user_id = self.owner.user_id,
            "row not visible"
        );
        ErrorEntry::relation(message).into()
    }

    fn persistence(&self, operation: &str, err: DbErr) -> ErrorStack {
        tracing::warn!(resource = R::NAME, operation, error = %err, "persistence failed");
        ErrorEntry::persistence(err).into()
    }
}

fn into_object(body: Value) -> ServiceResult<Map<String, Value>> {
    match body {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(ErrorEntry::invalid("Request body must be a JSON object").into()),
    }
}

fn decode<D: DeserializeOwned>(payload: Map<String, Value>) -> ServiceResult<D> {
    serde_json::from_value(Value::Object(payload))
        .map_err(|err| ErrorEntry::invalid(err.to_string()).into())
}

fn column_named<R: Resource>(name: &str) -> Option<ColumnOf<R>> {
    <ColumnOf<R> as Iterable>::iter().find(|column| column.as_str() == name)
}

fn order_of(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

/// Parses a raw query value according to the column type.
fn filter_value<C: ColumnTrait>(column: &C, raw: &str) -> Option<DbValue> {
    let value = match column.def().get_column_type() {
        ColumnType::TinyInteger
        | ColumnType::SmallInteger
        | ColumnType::Integer
        | ColumnType::BigInteger => DbValue::from(raw.trim().parse::<i64>().ok()?),
        ColumnType::Float | ColumnType::Double | ColumnType::Decimal(_) => {
            DbValue::from(raw.trim().parse::<f64>().ok()?)
        }
        ColumnType::Boolean => match raw.trim() {
            "1" | "true" => DbValue::from(true),
            "0" | "false" => DbValue::from(false),
            _ => return None,
        },
        ColumnType::Timestamp | ColumnType::TimestampWithTimeZone | ColumnType::DateTime => {
            DbValue::from(DateTime::parse_from_rfc3339(raw.trim()).ok()?)
        }
        _ => DbValue::from(raw.to_string()),
    };
    Some(value)
}
