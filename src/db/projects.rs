use super::db::Db;
use crate::libs::activity::Project;
use crate::libs::report::ProjectStore;
use anyhow::Result;
use rusqlite::{params, params_from_iter, Connection, Row, ToSql};
use std::path::Path;

const INSERT_PROJECT: &str = "INSERT INTO projects (title, description, active, organization_id) VALUES (?1, ?2, ?3, ?4)";
const SELECT_PROJECTS: &str = "SELECT id, title, description, active, organization_id FROM projects WHERE organization_id = ?";
const ORDER_BY_TITLE: &str = "ORDER BY title, id";

pub struct Projects {
    pub conn: Connection,
}

impl Projects {
    pub fn new() -> Result<Projects> {
        Ok(Projects { conn: Db::new()?.conn })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Projects> {
        Ok(Projects {
            conn: Db::open(path)?.conn,
        })
    }

    pub fn insert(&mut self, organization_id: i64, project: &Project) -> Result<i64> {
        self.conn
            .execute(INSERT_PROJECT, params![project.title, project.description, project.active, organization_id])?;

        Ok(self.conn.last_insert_rowid())
    }

    pub fn list(&self, organization_id: i64) -> Result<Vec<Project>> {
        self.query(&format!("{} {}", SELECT_PROJECTS, ORDER_BY_TITLE), vec![Box::new(organization_id)])
    }

    fn query(&self, sql: &str, values: Vec<Box<dyn ToSql>>) -> Result<Vec<Project>> {
        let mut stmt = self.conn.prepare(sql)?;
        let project_iter = stmt.query_map(params_from_iter(values.iter()), map_project)?;
        let mut projects = Vec::new();
        for project in project_iter {
            projects.push(project?);
        }

        Ok(projects)
    }
}

impl ProjectStore for Projects {
    fn find_by_ids(&self, organization_id: i64, ids: &[i64]) -> Result<Vec<Project>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "{} AND id IN ({}) {}",
            SELECT_PROJECTS,
            vec!["?"; ids.len()].join(", "),
            ORDER_BY_TITLE
        );
        let mut values: Vec<Box<dyn ToSql>> = vec![Box::new(organization_id)];
        values.extend(ids.iter().map(|id| Box::new(*id) as Box<dyn ToSql>));

        self.query(&sql, values)
    }
}

fn map_project(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        active: row.get(3)?,
        organization_id: row.get(4)?,
    })
}
