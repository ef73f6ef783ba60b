use tracing::{debug, info};

use crate::diagnostics::{Diagnostic, DiagnosticKind, Entity};
use crate::error::RemoteError;
use crate::model::destination::Created;
use crate::model::source::{Board, BoardList, Card};
use crate::providers::{DestinationWriter, SourceReader};
use crate::util::due::convert_due;

#[derive(Debug, Default, Clone)]
pub struct MigrationReport {
    pub boards_read: usize,
    pub lists_read: usize,
    pub cards_read: usize,
    pub projects_created: usize,
    pub sections_created: usize,
    pub tasks_created: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl MigrationReport {
    pub fn failures(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.kind != DiagnosticKind::EmptyListing)
            .count()
    }

    fn record(&mut self, diag: Diagnostic) {
        diag.emit();
        self.diagnostics.push(diag);
    }

    /// Turn a failed read into an empty listing for the caller.
    fn absorb_read<T>(
        &mut self,
        result: Result<Vec<T>, RemoteError>,
        entity: Entity,
        parent_id: Option<&str>,
    ) -> Vec<T> {
        match result {
            Ok(items) => {
                if items.is_empty() {
                    let message = match parent_id {
                        Some(id) => format!("no {}s found under {id}", entity.as_str()),
                        None => format!("no {}s found", entity.as_str()),
                    };
                    self.record(
                        Diagnostic::new(DiagnosticKind::EmptyListing, entity, message)
                            .with_id(parent_id),
                    );
                }
                items
            }
            Err(e) => {
                self.record(Diagnostic::from_remote(&e, entity, parent_id));
                Vec::new()
            }
        }
    }

    /// Turn a failed write into an absent gid for the caller.
    fn absorb_write(
        &mut self,
        result: Result<Created, RemoteError>,
        entity: Entity,
        source_id: &str,
    ) -> Option<String> {
        match result {
            Ok(created) => {
                debug!(
                    entity = entity.as_str(),
                    source_id,
                    gid = %created.gid,
                    name = ?created.name,
                    "Created"
                );
                Some(created.gid)
            }
            Err(e) => {
                self.record(Diagnostic::from_remote(&e, entity, Some(source_id)));
                None
            }
        }
    }
}

/// Convert a card's due date, falling back to the raw value when it does
/// not parse. An empty string is forwarded untouched. The second element
/// describes the parse failure, if any.
pub fn due_on_for(card: &Card) -> (Option<String>, Option<Diagnostic>) {
    let Some(raw) = card.due.as_deref() else {
        return (None, None);
    };
    if raw.is_empty() {
        return (Some(String::new()), None);
    }
    match convert_due(raw) {
        Ok(converted) => (Some(converted), None),
        Err(e) => {
            let diag = Diagnostic::new(
                DiagnosticKind::DateParse,
                Entity::Card,
                format!("could not convert due date {raw:?}: {e}"),
            )
            .with_id(Some(&card.id));
            (Some(raw.to_string()), Some(diag))
        }
    }
}

pub struct Migrator<'a> {
    source: &'a dyn SourceReader,
    dest: &'a dyn DestinationWriter,
    report: MigrationReport,
}

impl<'a> Migrator<'a> {
    pub fn new(source: &'a dyn SourceReader, dest: &'a dyn DestinationWriter) -> Self {
        Self {
            source,
            dest,
            report: MigrationReport::default(),
        }
    }

    /// Migrate every board, strictly one request at a time.
    pub async fn run(mut self) -> MigrationReport {
        let boards = self.source.list_boards().await;
        let boards = self.report.absorb_read(boards, Entity::Board, None);
        self.report.boards_read = boards.len();

        for board in &boards {
            self.migrate_board(board).await;
        }

        info!(
            boards = self.report.boards_read,
            lists = self.report.lists_read,
            cards = self.report.cards_read,
            projects = self.report.projects_created,
            sections = self.report.sections_created,
            tasks = self.report.tasks_created,
            failures = self.report.failures(),
            "Migration finished"
        );
        self.report
    }

    async fn migrate_board(&mut self, board: &Board) {
        let created = self.dest.create_project(&board.name, &board.desc).await;
        let Some(project_gid) = self
            .report
            .absorb_write(created, Entity::Project, &board.id)
        else {
            self.skip(Entity::Board, &board.id, "project");
            return;
        };
        self.report.projects_created += 1;
        info!(board = %board.name, project_gid = %project_gid, "Project created");

        let lists = self.source.list_lists(&board.id).await;
        let lists = self.report.absorb_read(lists, Entity::List, Some(&board.id));
        self.report.lists_read += lists.len();

        for list in &lists {
            self.migrate_list(&project_gid, list).await;
        }
    }

    async fn migrate_list(&mut self, project_gid: &str, list: &BoardList) {
        let created = self.dest.create_section(project_gid, &list.name).await;
        let Some(section_gid) = self
            .report
            .absorb_write(created, Entity::Section, &list.id)
        else {
            self.skip(Entity::List, &list.id, "section");
            return;
        };
        self.report.sections_created += 1;
        info!(list = %list.name, section_gid = %section_gid, "Section created");

        let cards = self.source.list_cards(&list.id).await;
        let cards = self.report.absorb_read(cards, Entity::Card, Some(&list.id));
        self.report.cards_read += cards.len();

        for card in &cards {
            self.migrate_card(project_gid, &section_gid, card).await;
        }
    }

    async fn migrate_card(&mut self, project_gid: &str, section_gid: &str, card: &Card) {
        let (due_on, parse_failure) = due_on_for(card);
        if let Some(diag) = parse_failure {
            self.report.record(diag);
        }

        let created = self
            .dest
            .create_task(
                project_gid,
                section_gid,
                &card.name,
                &card.desc,
                due_on.as_deref(),
            )
            .await;
        if let Some(task_gid) = self.report.absorb_write(created, Entity::Task, &card.id) {
            self.report.tasks_created += 1;
            debug!(card = %card.name, task_gid = %task_gid, "Task created");
        }
    }

    fn skip(&mut self, entity: Entity, id: &str, parent: &str) {
        let children = match entity {
            Entity::Board => "lists and cards",
            _ => "cards",
        };
        self.report.record(
            Diagnostic::new(
                DiagnosticKind::SkippedSubtree,
                entity,
                format!("{parent} was not created; skipping its {children}"),
            )
            .with_id(Some(id)),
        );
    }
}
