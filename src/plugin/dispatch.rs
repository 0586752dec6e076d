use std::time::Duration;

use tracing::{debug, info, warn};

use super::launch::{launch_program, refresh_view};
use super::listing::{render, sort_by_last_played};
use super::url::{Action, Target};
use super::DispatchError;
use crate::catalog::{CatalogStore, Program, ProgramFields};
use crate::host::{BrowseKind, Host, Notification};
use crate::system::opener::Opener;

const IMAGE_MASK: &str = ".jpg|.png";
const LOGO_MASK: &str = ".png";

pub struct Dispatcher<'a> {
    store: &'a CatalogStore,
    opener: &'a dyn Opener,
    toast: Duration,
}

impl<'a> Dispatcher<'a> {
    pub fn new(store: &'a CatalogStore, opener: &'a dyn Opener, toast: Duration) -> Self {
        Self {
            store,
            opener,
            toast,
        }
    }

    pub fn dispatch(&self, host: &mut dyn Host, invocation: &str) -> Result<(), DispatchError> {
        let action = Action::parse(invocation)?;
        debug!(invocation, ?action, "dispatching");
        self.run(host, action)
    }

    pub fn run(&self, host: &mut dyn Host, action: Action) -> Result<(), DispatchError> {
        match action {
            Action::List => self.show_programs(host),
            Action::Add => self.add_program(host),
            Action::Edit(target) => self.edit_program(host, &target),
            Action::Remove(target) => self.remove_program(host, &target),
            Action::Launch { path } => launch_program(self.store, self.opener, host, &path),
        }
    }

    fn show_programs(&self, host: &mut dyn Host) -> Result<(), DispatchError> {
        let programs = self.store.load()?;
        let count = programs.len();
        let listing = render(programs, host.addon(), host.is_widget());
        debug!(programs = count, widget = host.is_widget(), "listing rendered");
        host.end_directory(listing);
        Ok(())
    }

    fn add_program(&self, host: &mut dyn Host) -> Result<(), DispatchError> {
        let title = host.input("Enter program title", "");
        if title.is_empty() {
            debug!("add cancelled at title prompt");
            return Ok(());
        }

        let fields = prompt_fields(
            host,
            ProgramFields {
                title,
                ..ProgramFields::default()
            },
        );

        if !fields.is_complete() {
            warn!("add abandoned: title and path are required");
            host.notify(Notification::error("Failed to add program", self.toast));
            return Ok(());
        }

        let added = self.store.add(fields)?;
        refresh_view(host);
        host.notify(Notification::success(
            format!("Added program: {}", added.title),
            self.toast,
        ));
        Ok(())
    }

    fn edit_program(&self, host: &mut dyn Host, target: &Target) -> Result<(), DispatchError> {
        let program = self.resolve(target)?;
        let current = ProgramFields::from_program(&program);

        let title = host.input("Enter program title", &current.title);
        let fields = prompt_fields(host, ProgramFields { title, ..current });

        if !fields.is_complete() {
            warn!(id = %program.id, "edit abandoned: title and path are required");
            host.notify(Notification::error("Failed to update program", self.toast));
            return Ok(());
        }

        let edited = self.store.edit(&program.id, fields)?;
        host.notify(Notification::success(
            format!("Updated program: {}", edited.title),
            self.toast,
        ));
        refresh_view(host);
        Ok(())
    }

    fn remove_program(&self, host: &mut dyn Host, target: &Target) -> Result<(), DispatchError> {
        let program = self.resolve(target)?;
        let removed = self.store.remove(&program.id)?;
        host.notify(Notification::success(
            format!("Removed program: {}", removed.title),
            self.toast,
        ));
        refresh_view(host);
        Ok(())
    }

    /// Finds the record an edit/remove refers to. Indices count positions in
    /// the last-played order the listing shows, not file order.
    fn resolve(&self, target: &Target) -> Result<Program, DispatchError> {
        match target {
            Target::Id(id) => Ok(self.store.get(id)?),
            Target::Index(index) => {
                let mut programs = self.store.load_keyed()?;
                sort_by_last_played(&mut programs);
                let len = programs.len();
                info!(index, "resolving legacy index against last-played order");
                programs
                    .into_iter()
                    .nth(*index)
                    .ok_or(DispatchError::IndexOutOfRange { index: *index, len })
            }
        }
    }
}

fn prompt_fields(host: &mut dyn Host, current: ProgramFields) -> ProgramFields {
    let year = host.input("Enter year", &current.year);
    let description = host.input("Enter description", &current.description);
    let image = host.browse(
        BrowseKind::Image,
        "Select thumbnail image",
        IMAGE_MASK,
        &current.image,
    );
    let fanart = host.browse(
        BrowseKind::Image,
        "Select fanart image",
        IMAGE_MASK,
        &current.fanart,
    );
    let clearlogo = host.browse(
        BrowseKind::Image,
        "Select clearlogo image",
        LOGO_MASK,
        &current.clearlogo,
    );
    let path = host.browse(BrowseKind::File, "Select program", "", &current.path);

    ProgramFields {
        title: current.title,
        year,
        description,
        image,
        fanart,
        clearlogo,
        path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::host::testing::{FakeOpener, RecordingHost};
    use crate::host::Severity;
    use tempfile::TempDir;

    const TOAST: Duration = Duration::from_secs(5);

    fn seeded(records: &str) -> (TempDir, CatalogStore) {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::open(dir.path()).unwrap();
        std::fs::write(store.path(), records).unwrap();
        (dir, store)
    }

    fn answers_for(title: &str, path: &str) -> Vec<String> {
        vec![
            title.to_string(),
            "1998".to_string(),
            "A game".to_string(),
            "/art/thumb.png".to_string(),
            "/art/fanart.jpg".to_string(),
            "/art/logo.png".to_string(),
            path.to_string(),
        ]
    }

    #[test]
    fn listing_goes_to_the_host() {
        let (_dir, store) = seeded(
            r#"[{"title":"A","path":"/a","lastplayed":100},{"title":"B","path":"/b","lastplayed":200}]"#,
        );
        let opener = FakeOpener::default();
        let mut host = RecordingHost::new();

        Dispatcher::new(&store, &opener, TOAST)
            .dispatch(&mut host, "")
            .unwrap();

        let labels: Vec<_> = host
            .last_listing()
            .items
            .iter()
            .map(|item| item.item.label.clone())
            .collect();
        assert_eq!(labels, vec!["Add New Program", "B", "A"]);
    }

    #[test]
    fn legacy_index_refers_to_sorted_position() {
        let (_dir, store) = seeded(
            r#"[{"title":"A","path":"/a","lastplayed":100},{"title":"B","path":"/b","lastplayed":200}]"#,
        );
        let opener = FakeOpener::default();
        let dispatcher = Dispatcher::new(&store, &opener, TOAST);

        let mut host = RecordingHost::new();
        dispatcher
            .dispatch(&mut host, "?action=remove&index=0")
            .unwrap();
        let left: Vec<_> = store.load().unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(left, vec!["A"]);
        assert_eq!(host.notifications[0].message, "Removed program: B");

        let err = dispatcher
            .dispatch(&mut host, "?action=remove&index=1")
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::IndexOutOfRange { index: 1, len: 1 }
        ));
    }

    #[test]
    fn context_actions_from_listing_hit_the_shown_record() {
        let (_dir, store) = seeded(
            r#"[{"title":"A","path":"/a","lastplayed":100},{"title":"B","path":"/b","lastplayed":200}]"#,
        );
        let opener = FakeOpener::default();
        let dispatcher = Dispatcher::new(&store, &opener, TOAST);
        let mut host = RecordingHost::new();
        dispatcher.dispatch(&mut host, "").unwrap();

        let remove_a = host.last_listing().items[2]
            .item
            .context_action("Remove")
            .unwrap()
            .url
            .clone();
        dispatcher.dispatch(&mut host, &remove_a).unwrap();

        let left: Vec<_> = store.load().unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(left, vec!["B"]);
    }

    #[test]
    fn listing_a_legacy_catalog_leaves_the_file_alone() {
        let raw = r#"[{"title":"A","path":"/a","lastplayed":100}]"#;
        let (_dir, store) = seeded(raw);
        let opener = FakeOpener::default();
        let mut host = RecordingHost::new();

        Dispatcher::new(&store, &opener, TOAST)
            .dispatch(&mut host, "")
            .unwrap();

        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), raw);
        assert_eq!(host.last_listing().items.len(), 2);
    }

    #[test]
    fn add_appends_and_refreshes() {
        let (_dir, store) = seeded("[]");
        let opener = FakeOpener::default();
        let mut host = RecordingHost::with_answers(answers_for("Quake", "/games/quake"));

        Dispatcher::new(&store, &opener, TOAST)
            .dispatch(&mut host, "?action=add")
            .unwrap();

        let programs = store.load().unwrap();
        assert_eq!(programs.len(), 1);
        let quake = &programs[0];
        assert_eq!(quake.title, "Quake");
        assert_eq!(quake.year.to_string(), "1998");
        assert_eq!(quake.clearlogo(), Some("/art/logo.png"));
        assert_eq!(quake.path, "/games/quake");
        assert_eq!(quake.lastplayed, 0);

        assert_eq!(host.container_refreshes, 1);
        assert_eq!(host.widget_refreshes, 1);
        assert_eq!(host.notifications[0].message, "Added program: Quake");
        assert_eq!(host.notifications[0].duration, TOAST);

        let masks: Vec<_> = host
            .prompts
            .iter()
            .filter_map(|prompt| prompt.browse.clone())
            .collect();
        assert_eq!(
            masks,
            vec![
                (BrowseKind::Image, ".jpg|.png".to_string()),
                (BrowseKind::Image, ".jpg|.png".to_string()),
                (BrowseKind::Image, ".png".to_string()),
                (BrowseKind::File, String::new()),
            ]
        );
    }

    #[test]
    fn add_with_empty_title_stops_silently() {
        let (_dir, store) = seeded("[]");
        let opener = FakeOpener::default();
        let mut host = RecordingHost::with_answers([""]);

        Dispatcher::new(&store, &opener, TOAST)
            .dispatch(&mut host, "?action=add")
            .unwrap();

        assert_eq!(host.prompts.len(), 1);
        assert!(host.notifications.is_empty());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn add_without_path_is_rejected() {
        let (_dir, store) = seeded("[]");
        let opener = FakeOpener::default();
        let mut host = RecordingHost::with_answers(answers_for("Quake", ""));

        Dispatcher::new(&store, &opener, TOAST)
            .dispatch(&mut host, "?action=add")
            .unwrap();

        assert!(store.load().unwrap().is_empty());
        assert_eq!(host.notifications.len(), 1);
        assert_eq!(host.notifications[0].severity, Severity::Error);
        assert_eq!(host.notifications[0].message, "Failed to add program");
        assert_eq!(host.container_refreshes, 0);
    }

    #[test]
    fn edit_prefills_and_keeps_lastplayed() {
        let (_dir, store) = seeded(
            r#"[{"id":"q1","title":"Quake","year":"1996","description":"old","image":"/i.png","fanart":"/f.jpg","path":"/q","lastplayed":321}]"#,
        );
        let opener = FakeOpener::default();
        let mut host = RecordingHost::with_answers(answers_for("Quake II", "/q2"));

        Dispatcher::new(&store, &opener, TOAST)
            .dispatch(&mut host, "?action=edit&id=q1")
            .unwrap();

        let defaults: Vec<_> = host.prompts.iter().map(|p| p.default.as_str()).collect();
        assert_eq!(defaults, vec!["Quake", "1996", "old", "/i.png", "/f.jpg", "", "/q"]);

        let edited = store.get("q1").unwrap();
        assert_eq!(edited.title, "Quake II");
        assert_eq!(edited.path, "/q2");
        assert_eq!(edited.lastplayed, 321);
        assert_eq!(host.notifications[0].message, "Updated program: Quake II");
    }

    #[test]
    fn edit_accepting_defaults_changes_nothing() {
        let raw = r#"[{"id":"q1","title":"Quake","year":1996,"description":"old","image":"/i.png","fanart":"/f.jpg","path":"/q","lastplayed":321}]"#;
        let (_dir, store) = seeded(raw);
        let before = store.load().unwrap();
        let opener = FakeOpener::default();
        // The title prompt is an input dialog and answers literally; the
        // browse dialogs fall back to their defaults once answers run out.
        let mut host = RecordingHost::with_answers(["Quake", "1996", "old"]);

        Dispatcher::new(&store, &opener, TOAST)
            .dispatch(&mut host, "?action=edit&id=q1")
            .unwrap();

        assert_eq!(store.load().unwrap(), before);
    }

    #[test]
    fn edit_with_blank_title_is_rejected() {
        let (_dir, store) = seeded(r#"[{"id":"q1","title":"Quake","path":"/q"}]"#);
        let opener = FakeOpener::default();
        let mut host = RecordingHost::with_answers([""]);

        Dispatcher::new(&store, &opener, TOAST)
            .dispatch(&mut host, "?action=edit&id=q1")
            .unwrap();

        assert_eq!(store.get("q1").unwrap().title, "Quake");
        assert_eq!(host.notifications[0].message, "Failed to update program");
    }

    #[test]
    fn unknown_id_is_a_lookup_miss() {
        let (_dir, store) = seeded(r#"[{"id":"q1","title":"Quake","path":"/q"}]"#);
        let opener = FakeOpener::default();
        let mut host = RecordingHost::new();

        let err = Dispatcher::new(&store, &opener, TOAST)
            .dispatch(&mut host, "?action=remove&id=nope")
            .unwrap_err();

        assert!(matches!(
            err,
            DispatchError::Catalog(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn launch_url_reaches_the_opener() {
        let (_dir, store) = seeded(r#"[{"id":"q1","title":"Quake","path":"/games/my quake"}]"#);
        let opener = FakeOpener::default();
        let dispatcher = Dispatcher::new(&store, &opener, TOAST);
        let mut host = RecordingHost::new();
        dispatcher.dispatch(&mut host, "").unwrap();

        let url = host.last_listing().items[1].url.clone();
        dispatcher.dispatch(&mut host, &url).unwrap();

        assert_eq!(opener.opened(), vec!["/games/my quake".to_string()]);
        assert!(store.get("q1").unwrap().lastplayed > 0);
    }

    #[test]
    fn corrupt_catalog_fails_the_invocation() {
        let (_dir, store) = seeded("{{{");
        let opener = FakeOpener::default();
        let mut host = RecordingHost::new();

        let err = Dispatcher::new(&store, &opener, TOAST)
            .dispatch(&mut host, "")
            .unwrap_err();

        assert!(matches!(
            err,
            DispatchError::Catalog(CatalogError::Corrupt { .. })
        ));
        assert!(host.listings.is_empty());
    }
}
