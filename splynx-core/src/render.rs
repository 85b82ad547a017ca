//! Plain-text report bodies.
//!
//! Rendering is pure: no I/O, inputs are borrowed. Lines are joined with
//! `\n` without a trailing terminator, so a body ending in an empty line
//! ends in exactly one `\n`.

use chrono::NaiveDate;

use crate::classify::Bucket;
use crate::group::{DigestGroup, SummaryGroup};
use crate::resolve::{customer_name, location_name, project_name, summary_title, NameLookup};
use crate::task::Task;
use crate::time::date_label;

const COMMENT_RULE_WIDTH: usize = 40;
const SECTION_RULE_WIDTH: usize = 70;

/// Digest file body for one task.
pub fn render_digest(group: &DigestGroup) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Orden de servicio / Task: {} (ID: {})",
        group.title, group.task.id
    ));
    lines.push(format!("Técnico: {}", group.technician));
    if let Some(customer) = customer_name(&group.task) {
        lines.push(format!("Cliente: {customer}"));
    }
    lines.push(String::new());

    if group.comments.is_empty() {
        lines.push("Sin comentarios.".to_string());
    } else {
        lines.push("Comentarios del día:".to_string());
        lines.push("-----------".to_string());
        for c in &group.comments {
            lines.push(format!("[{}] {}:", c.created_at, c.author()));
            lines.push(c.body().to_string());
            lines.push("-".repeat(COMMENT_RULE_WIDTH));
        }
    }

    lines.join("\n")
}

/// Summary file body for one technician.
pub fn render_summary(
    group: &SummaryGroup,
    date: NaiveDate,
    projects: &NameLookup,
    locations: &NameLookup,
) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Técnico: {}", group.technician));
    lines.push(format!("Fecha: {}", date_label(date)));
    lines.push(format!(
        "Tareas pendientes (calendarizadas): {}",
        group.pending.len()
    ));
    lines.push(format!(
        "Tareas cerradas   (calendarizadas): {}",
        group.closed.len()
    ));
    lines.push(String::new());

    push_section(&mut lines, group, Bucket::Pending, projects, locations);
    lines.push(String::new());
    push_section(&mut lines, group, Bucket::Closed, projects, locations);

    lines.join("\n")
}

fn push_section(
    lines: &mut Vec<String>,
    group: &SummaryGroup,
    bucket: Bucket,
    projects: &NameLookup,
    locations: &NameLookup,
) {
    let rule = "=".repeat(SECTION_RULE_WIDTH);
    lines.push(rule.clone());
    lines.push(bucket.heading().to_string());
    lines.push(rule);
    lines.push(String::new());

    for task in group.bucket(bucket) {
        push_entry(lines, task, projects, locations);
    }
}

fn push_entry(lines: &mut Vec<String>, task: &Task, projects: &NameLookup, locations: &NameLookup) {
    lines.push(format!("- ID {}", task.id));
    if let Some(at) = task.scheduled_from.as_deref() {
        lines.push(format!("  Programada: {at}"));
    }
    lines.push(format!("  Proyecto:   {}", project_name(task, projects)));
    lines.push(format!("  Ubicación:  {}", location_name(task, locations)));
    lines.push(format!("  Título:     {}", summary_title(task)));
    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_summary;
    use crate::resolve::TechnicianTable;
    use crate::source::{Location, Project};
    use crate::task::{Comment, Named};

    #[test]
    fn digest_with_comments() {
        let task = Task::new(42).with_title("Instalación Fibra").with_technician("Denis Corzo");
        let group = DigestGroup::new(
            task,
            vec![
                Comment::new(42, "2024-03-05 17:10:00", "Ana", "Cerrada OK"),
                Comment::new(42, "2024-03-05 09:00:00", "Ana", "Llegué al domicilio"),
            ],
        );
        let dashes = "-".repeat(40);
        let expected = format!(
            "Orden de servicio / Task: Instalación Fibra (ID: 42)\n\
             Técnico: Denis Corzo\n\
             \n\
             Comentarios del día:\n\
             -----------\n\
             [2024-03-05 09:00:00] Ana:\n\
             Llegué al domicilio\n\
             {dashes}\n\
             [2024-03-05 17:10:00] Ana:\n\
             Cerrada OK\n\
             {dashes}"
        );
        assert_eq!(render_digest(&group), expected);
    }

    #[test]
    fn digest_without_comments_and_with_customer() {
        let mut task = Task::new(7).with_technician("Rodrigo Sosa");
        task.customer = Some(Named { name: Some("Cooperativa Sur".into()) });
        let group = DigestGroup::new(task, vec![]);
        assert_eq!(
            render_digest(&group),
            "Orden de servicio / Task: Tarea_7 (ID: 7)\n\
             Técnico: Rodrigo Sosa\n\
             Cliente: Cooperativa Sur\n\
             \n\
             Sin comentarios."
        );
    }

    #[test]
    fn summary_layout() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let table: TechnicianTable = [(29, "Denis Corzo")].into_iter().collect();
        let mut pending = Task::new(10)
            .with_schedule("2024-03-05 09:00:00")
            .with_title("Revisión ONU")
            .with_assignee(29);
        pending.project_id = Some(1);
        pending.location_id = Some(3);
        let mut closed = Task::new(11).with_title("Cambio de router").with_assignee(29).with_closed(true);
        closed.is_scheduled = true;
        closed.address = Some("Calle 9 123".into());

        let groups = group_summary(vec![pending, closed], &table, false);
        let projects = NameLookup::from_projects(&[Project { id: 1, title: Some("Fibra".into()) }]);
        let locations = NameLookup::from_locations(&[Location { id: 3, name: Some("Centro".into()) }]);

        let rule = "=".repeat(70);
        let expected = format!(
            "Técnico: Denis Corzo\n\
             Fecha: 2024-03-05\n\
             Tareas pendientes (calendarizadas): 1\n\
             Tareas cerradas   (calendarizadas): 1\n\
             \n\
             {rule}\nPENDIENTES\n{rule}\n\
             \n\
             - ID 10\n\
             \x20 Programada: 2024-03-05 09:00:00\n\
             \x20 Proyecto:   Fibra\n\
             \x20 Ubicación:  Centro\n\
             \x20 Título:     Revisión ONU\n\
             \n\
             \n\
             {rule}\nCERRADAS\n{rule}\n\
             \n\
             - ID 11\n\
             \x20 Proyecto:   Sin proyecto\n\
             \x20 Ubicación:  Calle 9 123\n\
             \x20 Título:     Cambio de router\n"
        );
        assert_eq!(render_summary(&groups[0], date, &projects, &locations), expected);
    }

    #[test]
    fn empty_sections_keep_their_frame() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let group = SummaryGroup {
            technician: "SIN_ASIGNAR".into(),
            ..SummaryGroup::default()
        };
        let out = render_summary(&group, date, &NameLookup::empty(), &NameLookup::empty());
        assert!(out.contains("Tareas pendientes (calendarizadas): 0"));
        assert!(out.contains("PENDIENTES"));
        assert!(out.ends_with("CERRADAS\n======================================================================\n"));
    }
}
