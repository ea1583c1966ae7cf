//! Translation of domain sort specs into SeaORM ordering.

use sea_orm::{
    DbBackend, EntityTrait, IdenStatic, Iterable, PrimaryKeyToColumn, QueryOrder, Select,
    Statement,
};

use common::{AppError, AppResult};
use domain::{Direction, Sort};

/// Rows fetched per round trip by `stream_all`
pub const STREAM_BATCH_SIZE: u64 = 100;

/// Column backing the entity's single-column primary key.
pub fn key_column<E: EntityTrait>() -> AppResult<E::Column> {
    E::PrimaryKey::iter()
        .next()
        .map(PrimaryKeyToColumn::into_column)
        .ok_or_else(|| AppError::internal(format!("entity {} has no primary key", E::default().table_name())))
}

/// Resolve a sort property to a column by its column name.
pub fn column_named<E: EntityTrait>(property: &str) -> AppResult<E::Column> {
    E::Column::iter()
        .find(|column| column.as_str() == property)
        .ok_or_else(|| {
            AppError::invalid_argument(format!(
                "unknown sort property '{}' for {}",
                property,
                E::default().table_name()
            ))
        })
}

fn to_sea_order(direction: Direction) -> sea_orm::Order {
    match direction {
        Direction::Asc => sea_orm::Order::Asc,
        Direction::Desc => sea_orm::Order::Desc,
    }
}

/// Apply `sort`, then the primary key as a final tie-breaker so paging is stable.
///
/// Every property is validated before the query is touched.
pub fn apply_sort<E: EntityTrait>(select: Select<E>, sort: &Sort) -> AppResult<Select<E>> {
    let columns = sort
        .orders()
        .iter()
        .map(|order| Ok((column_named::<E>(&order.property)?, order.direction)))
        .collect::<AppResult<Vec<_>>>()?;

    let select = columns
        .into_iter()
        .fold(select, |select, (column, direction)| {
            select.order_by(column, to_sea_order(direction))
        });

    Ok(select.order_by_asc(key_column::<E>()?))
}

/// Statement moving the key sequence past the largest stored key, for
/// backends whose sequences do not track explicitly inserted keys.
pub fn key_sequence_resync<E: EntityTrait>(backend: DbBackend) -> AppResult<Option<Statement>> {
    if backend != DbBackend::Postgres {
        return Ok(None);
    }

    let table = E::default().table_name().to_string();
    let column = key_column::<E>()?;
    let column = column.as_str();
    let sql = format!(
        r#"SELECT setval(pg_get_serial_sequence('{table}', '{column}'), (SELECT MAX("{column}") FROM "{table}"))"#
    );
    Ok(Some(Statement::from_string(backend, sql)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::entities::team;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn resolves_known_columns() {
        assert!(matches!(column_named::<team::Entity>("name"), Ok(team::Column::Name)));
        assert!(matches!(key_column::<team::Entity>(), Ok(team::Column::Id)));
    }

    #[test]
    fn rejects_unknown_property() {
        let err = column_named::<team::Entity>("members").unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
        assert!(err.to_string().contains("members"));
    }

    #[test]
    fn sort_ends_with_key_tie_breaker() {
        let select = apply_sort(team::Entity::find(), &Sort::by_desc("name")).unwrap();
        let sql = select.build(DbBackend::Sqlite).to_string();
        assert!(sql.ends_with(r#"ORDER BY "teams"."name" DESC, "teams"."id" ASC"#), "{}", sql);
    }

    #[test]
    fn unsorted_orders_by_key() {
        let select = apply_sort(team::Entity::find(), &Sort::unsorted()).unwrap();
        let sql = select.build(DbBackend::Sqlite).to_string();
        assert!(sql.ends_with(r#"ORDER BY "teams"."id" ASC"#), "{}", sql);
    }

    #[test]
    fn postgres_key_sequence_follows_explicit_keys() {
        let statement = key_sequence_resync::<team::Entity>(DbBackend::Postgres)
            .unwrap()
            .unwrap();
        assert_eq!(
            statement.to_string(),
            r#"SELECT setval(pg_get_serial_sequence('teams', 'id'), (SELECT MAX("id") FROM "teams"))"#
        );
    }

    #[test]
    fn sqlite_needs_no_key_sequence_resync() {
        assert!(key_sequence_resync::<team::Entity>(DbBackend::Sqlite).unwrap().is_none());
        assert!(key_sequence_resync::<team::Entity>(DbBackend::MySql).unwrap().is_none());
    }
}
