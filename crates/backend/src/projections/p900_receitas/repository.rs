use anyhow::Result;
use contracts::projections::p900_receitas::dto::{ExcipienteQtd, ReceitaLinha};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

/// Register row: one excipient required by one prescription.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "p900_receitas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub codigo_receita: String,

    /// Active-ingredient display name, repeated on every row of the code
    pub ativo: String,

    #[sea_orm(primary_key, auto_increment = false)]
    pub excipiente: String,

    /// Required quantity, kilograms
    pub qtd_materia_prima: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ReceitaLinha {
    fn from(m: Model) -> Self {
        ReceitaLinha {
            codigo_receita: m.codigo_receita,
            ativo: m.ativo,
            excipiente: m.excipiente,
            qtd_materia_prima: m.qtd_materia_prima,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// All columns for one prescription code (order-lookup query shape).
pub async fn find_by_codigo(codigo: &str) -> Result<Vec<ReceitaLinha>> {
    let rows = Entity::find()
        .filter(Column::CodigoReceita.eq(codigo))
        .order_by_asc(Column::Excipiente)
        .all(conn())
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// `(excipiente, qtd_materia_prima)` pairs for one prescription code
/// (aggregation query shape).
pub async fn excipientes_por_codigo(codigo: &str) -> Result<Vec<ExcipienteQtd>> {
    #[derive(Debug, FromQueryResult)]
    struct Par {
        excipiente: String,
        qtd_materia_prima: f64,
    }

    let pares = Entity::find()
        .select_only()
        .column(Column::Excipiente)
        .column(Column::QtdMateriaPrima)
        .filter(Column::CodigoReceita.eq(codigo))
        .order_by_asc(Column::Excipiente)
        .into_model::<Par>()
        .all(conn())
        .await?;

    Ok(pares
        .into_iter()
        .map(|p| ExcipienteQtd {
            excipiente: p.excipiente,
            qtd_materia_prima: p.qtd_materia_prima,
        })
        .collect())
}

/// Upsert register rows keyed by (codigo_receita, excipiente).
pub async fn upsert_linhas(linhas: &[ReceitaLinha]) -> Result<()> {
    if linhas.is_empty() {
        return Ok(());
    }

    let models: Vec<ActiveModel> = linhas
        .iter()
        .map(|l| ActiveModel {
            codigo_receita: Set(l.codigo_receita.clone()),
            ativo: Set(l.ativo.clone()),
            excipiente: Set(l.excipiente.clone()),
            qtd_materia_prima: Set(l.qtd_materia_prima),
        })
        .collect();

    Entity::insert_many(models)
        .on_conflict(
            OnConflict::columns([Column::CodigoReceita, Column::Excipiente])
                .update_columns([Column::Ativo, Column::QtdMateriaPrima])
                .to_owned(),
        )
        .exec(conn())
        .await?;

    Ok(())
}

/// Total row count, used by the startup probe.
pub async fn count() -> Result<u64> {
    let total = Entity::find().count(conn()).await?;
    Ok(total)
}
