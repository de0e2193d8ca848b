//! Survey authoring.
//!
//! Every edit is a pure step `apply(&Survey, SurveyEdit) -> Survey`. The
//! `EditHistory` keeps the snapshots around for undo/redo and saves the
//! current one through a `Repository<Survey>`.

use survey_engine_types::{
    Element, ElementId, ElementKind, ElementType, Page, PageId, Repository, StoreError, Survey,
    SurveySettings, SurveyStatus,
};

/// Number of snapshots kept for undo by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// One authoring action.
#[derive(Debug, Clone, PartialEq)]
pub enum SurveyEdit {
    SetTitle(String),
    SetType(String),
    SetStatus(SurveyStatus),
    UpdateSettings(SurveySettings),

    /// Append a page; unnamed pages are called "Page N".
    AddPage { name: Option<String> },
    RenamePage { page: PageId, name: String },
    RemovePage { page: PageId },
    MovePage { page: PageId, to: usize },

    /// Insert a default element of `element_type`, at the end if `index` is `None`.
    AddElement {
        page: PageId,
        element_type: ElementType,
        index: Option<usize>,
    },
    /// Replace the element with the same id.
    UpdateElement(Element),
    /// Switch an element to another type, keeping label, hint and choices.
    ChangeElementType {
        element: ElementId,
        element_type: ElementType,
    },
    RemoveElement(ElementId),
    /// Move an element to `index` on `page` (possibly another page).
    MoveElement {
        element: ElementId,
        page: PageId,
        index: usize,
    },
    /// Insert a copy with a fresh id right after the original.
    DuplicateElement(ElementId),
}

/// Error type for rejected edits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Page not found: {0}")]
    PageNotFound(PageId),

    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    #[error("A survey needs at least one page")]
    LastPage,

    #[error("Index {index} is out of range (max {max})")]
    IndexOutOfRange { index: usize, max: usize },
}

/// Apply one edit, returning the edited copy.
pub fn apply(survey: &Survey, edit: SurveyEdit) -> Result<Survey, EditError> {
    let mut next = survey.clone();

    match edit {
        SurveyEdit::SetTitle(title) => next.title = title,
        SurveyEdit::SetType(survey_type) => next.survey_type = survey_type,
        SurveyEdit::SetStatus(status) => next.status = status,
        SurveyEdit::UpdateSettings(settings) => next.settings = settings,

        SurveyEdit::AddPage { name } => {
            let name = name.unwrap_or_else(|| format!("Page {}", next.pages.len() + 1));
            next.pages.push(Page::new(name));
        }
        SurveyEdit::RenamePage { page, name } => {
            let index = page_index(&next, &page)?;
            next.pages[index].name = name;
        }
        SurveyEdit::RemovePage { page } => {
            let index = page_index(&next, &page)?;
            if next.pages.len() == 1 {
                return Err(EditError::LastPage);
            }
            next.pages.remove(index);
        }
        SurveyEdit::MovePage { page, to } => {
            let from = page_index(&next, &page)?;
            check_index(to, next.pages.len() - 1)?;
            let moved = next.pages.remove(from);
            next.pages.insert(to, moved);
        }

        SurveyEdit::AddElement {
            page,
            element_type,
            index,
        } => {
            let page_index = page_index(&next, &page)?;
            let elements = next.pages[page_index].elements_mut();
            let index = index.unwrap_or(elements.len());
            check_index(index, elements.len())?;
            elements.insert(index, Element::new(element_type));
        }
        SurveyEdit::UpdateElement(element) => {
            let id = element.id().clone();
            *element_mut(&mut next, &id)? = element;
        }
        SurveyEdit::ChangeElementType {
            element,
            element_type,
        } => {
            let target = element_mut(&mut next, &element)?;
            let mut kind = ElementKind::default_for(element_type);
            if let (Some(old), Some(new)) = (target.kind().choices(), kind.choices_mut()) {
                *new = old.to_vec();
            }
            *target.kind_mut() = kind;
        }
        SurveyEdit::RemoveElement(element) => {
            let (page_index, position) = locate(&next, &element)?;
            next.pages[page_index].elements_mut().remove(position);
        }
        SurveyEdit::MoveElement {
            element,
            page,
            index,
        } => {
            let (from_page, position) = locate(&next, &element)?;
            let to_page = page_index(&next, &page)?;

            // Bounds are checked against the target page without the element.
            let target_len = next.pages[to_page].len() - usize::from(from_page == to_page);
            check_index(index, target_len)?;

            let moved = next.pages[from_page].elements_mut().remove(position);
            next.pages[to_page].elements_mut().insert(index, moved);
        }
        SurveyEdit::DuplicateElement(element) => {
            let (page_index, position) = locate(&next, &element)?;
            let elements = next.pages[page_index].elements_mut();
            let mut copy = elements[position].clone();
            copy.regenerate_id();
            copy.set_label(format!("{} (copy)", copy.label()));
            elements.insert(position + 1, copy);
        }
    }

    Ok(next)
}

fn page_index(survey: &Survey, page: &PageId) -> Result<usize, EditError> {
    survey
        .page_index(page)
        .ok_or_else(|| EditError::PageNotFound(page.clone()))
}

fn locate(survey: &Survey, element: &ElementId) -> Result<(usize, usize), EditError> {
    survey
        .locate_element(element)
        .ok_or_else(|| EditError::ElementNotFound(element.clone()))
}

fn element_mut<'a>(
    survey: &'a mut Survey,
    element: &ElementId,
) -> Result<&'a mut Element, EditError> {
    let (page_index, position) = locate(survey, element)?;
    Ok(&mut survey.pages[page_index].elements_mut()[position])
}

fn check_index(index: usize, max: usize) -> Result<(), EditError> {
    if index > max {
        return Err(EditError::IndexOutOfRange { index, max });
    }
    Ok(())
}

/// Undo/redo over survey snapshots.
#[derive(Debug, Clone)]
pub struct EditHistory {
    current: Survey,
    undo: Vec<Survey>,
    redo: Vec<Survey>,
    limit: usize,
    dirty: bool,
}

impl EditHistory {
    pub fn new(survey: Survey) -> Self {
        Self {
            current: survey,
            undo: Vec::new(),
            redo: Vec::new(),
            limit: DEFAULT_HISTORY_LIMIT,
            dirty: false,
        }
    }

    /// Keep at most `limit` undo snapshots.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn current(&self) -> &Survey {
        &self.current
    }

    /// Check if there are edits not yet saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Apply an edit to the current snapshot. A rejected edit changes nothing.
    pub fn apply(&mut self, edit: SurveyEdit) -> Result<&Survey, EditError> {
        let next = apply(&self.current, edit)?;
        let previous = std::mem::replace(&mut self.current, next);

        self.undo.push(previous);
        if self.undo.len() > self.limit {
            self.undo.remove(0);
        }
        self.redo.clear();
        self.dirty = true;

        Ok(&self.current)
    }

    /// Step back one edit. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.current, previous);
        self.redo.push(current);
        self.dirty = true;
        true
    }

    /// Re-apply the last undone edit. Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.current, next);
        self.undo.push(current);
        self.dirty = true;
        true
    }

    /// Save the current snapshot: insert if it was never stored, update otherwise.
    ///
    /// The stored copy (with its generated id and timestamps) becomes current.
    pub async fn save<R>(&mut self, repo: &R) -> Result<&Survey, StoreError>
    where
        R: Repository<Survey> + ?Sized,
    {
        let snapshot = self.current.clone();
        let stored = if snapshot.id.is_nil() {
            repo.insert(snapshot).await?
        } else {
            repo.update(snapshot).await?
        };

        tracing::info!(survey = %stored.id, pages = stored.total_pages(), "survey saved");
        self.stamp_identity(&stored);
        self.current = stored;
        self.dirty = false;

        Ok(&self.current)
    }

    // Older snapshots of a first-time save still carry the nil id.
    fn stamp_identity(&mut self, stored: &Survey) {
        for snapshot in self.undo.iter_mut().chain(self.redo.iter_mut()) {
            snapshot.id = stored.id;
            snapshot.created_at = stored.created_at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRepository;

    fn survey() -> Survey {
        let first = Page::new("Intro")
            .with_element(Element::new(ElementType::ShortText).with_id("name"))
            .with_element(Element::new(ElementType::Email).with_id("email"));
        let second = Page::new("Feedback")
            .with_element(Element::new(ElementType::Rating).with_id("score"));
        Survey::new("Workshop", "workshop_feedback").with_pages(vec![first, second])
    }

    fn page_id(survey: &Survey, index: usize) -> PageId {
        survey.pages[index].id.clone()
    }

    fn ids(page: &Page) -> Vec<&str> {
        page.elements().iter().map(|e| e.id().as_str()).collect()
    }

    #[test]
    fn apply_leaves_input_untouched() {
        let original = survey();
        let edited = apply(&original, SurveyEdit::SetTitle("Renamed".into())).unwrap();
        assert_eq!(original.title, "Workshop");
        assert_eq!(edited.title, "Renamed");
    }

    #[test]
    fn add_page_names_it_by_position() {
        let edited = apply(&survey(), SurveyEdit::AddPage { name: None }).unwrap();
        assert_eq!(edited.pages[2].name, "Page 3");
        assert!(edited.pages[2].is_empty());
    }

    #[test]
    fn last_page_cannot_be_removed() {
        let one = Survey::new("Solo", "general");
        let page = page_id(&one, 0);
        assert_eq!(
            apply(&one, SurveyEdit::RemovePage { page }),
            Err(EditError::LastPage)
        );
    }

    #[test]
    fn move_page() {
        let original = survey();
        let page = page_id(&original, 1);
        let edited = apply(&original, SurveyEdit::MovePage { page, to: 0 }).unwrap();
        assert_eq!(edited.pages[0].name, "Feedback");

        let page = page_id(&original, 0);
        assert!(matches!(
            apply(&original, SurveyEdit::MovePage { page, to: 2 }),
            Err(EditError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn add_element_at_index_with_defaults() {
        let original = survey();
        let page = page_id(&original, 0);
        let edited = apply(
            &original,
            SurveyEdit::AddElement {
                page,
                element_type: ElementType::Checkboxes,
                index: Some(1),
            },
        )
        .unwrap();

        let added = &edited.pages[0].elements()[1];
        assert_eq!(added.element_type(), ElementType::Checkboxes);
        assert_eq!(added.kind().choices().map(<[String]>::len), Some(3));
        assert_eq!(edited.pages[0].len(), 3);
    }

    #[test]
    fn unknown_targets_are_rejected() {
        let original = survey();
        assert_eq!(
            apply(&original, SurveyEdit::RemoveElement("missing".into())),
            Err(EditError::ElementNotFound("missing".into()))
        );
        assert!(matches!(
            apply(&original, SurveyEdit::RenamePage {
                page: PageId::new("missing"),
                name: "x".into(),
            }),
            Err(EditError::PageNotFound(_))
        ));
    }

    #[test]
    fn move_element_across_pages() {
        let original = survey();
        let page = page_id(&original, 1);
        let edited = apply(
            &original,
            SurveyEdit::MoveElement {
                element: "name".into(),
                page,
                index: 1,
            },
        )
        .unwrap();

        assert_eq!(ids(&edited.pages[0]), vec!["email"]);
        assert_eq!(ids(&edited.pages[1]), vec!["score", "name"]);
    }

    #[test]
    fn move_element_within_page() {
        let original = survey();
        let page = page_id(&original, 0);
        let edited = apply(
            &original,
            SurveyEdit::MoveElement {
                element: "name".into(),
                page: page.clone(),
                index: 1,
            },
        )
        .unwrap();
        assert_eq!(ids(&edited.pages[0]), vec!["email", "name"]);

        assert!(apply(
            &original,
            SurveyEdit::MoveElement {
                element: "name".into(),
                page,
                index: 2,
            },
        )
        .is_err());
    }

    #[test]
    fn duplicate_gets_fresh_id_after_original() {
        let edited = apply(&survey(), SurveyEdit::DuplicateElement("email".into())).unwrap();
        let elements = edited.pages[0].elements();

        assert_eq!(elements.len(), 3);
        assert_ne!(elements[2].id().as_str(), "email");
        assert_eq!(elements[2].element_type(), ElementType::Email);
        assert!(elements[2].label().ends_with("(copy)"));
    }

    #[test]
    fn change_type_keeps_label_and_choices() {
        let original = apply(
            &survey(),
            SurveyEdit::UpdateElement(
                Element::new(ElementType::MultipleChoice)
                    .with_id("name")
                    .with_label("Pick one"),
            ),
        )
        .unwrap();

        let edited = apply(
            &original,
            SurveyEdit::ChangeElementType {
                element: "name".into(),
                element_type: ElementType::Dropdown,
            },
        )
        .unwrap();

        let element = edited.find_element(&"name".into()).unwrap();
        assert_eq!(element.element_type(), ElementType::Dropdown);
        assert_eq!(element.label(), "Pick one");
        assert_eq!(
            element.kind().choices(),
            original.find_element(&"name".into()).unwrap().kind().choices()
        );
    }

    #[test]
    fn undo_and_redo() {
        let mut history = EditHistory::new(survey());
        assert!(!history.can_undo());

        history.apply(SurveyEdit::SetTitle("One".into())).unwrap();
        history.apply(SurveyEdit::SetTitle("Two".into())).unwrap();

        assert!(history.undo());
        assert_eq!(history.current().title, "One");
        assert!(history.undo());
        assert_eq!(history.current().title, "Workshop");
        assert!(!history.undo());

        assert!(history.redo());
        assert_eq!(history.current().title, "One");

        // A new edit discards the redo stack.
        history.apply(SurveyEdit::SetStatus(SurveyStatus::Active)).unwrap();
        assert!(!history.can_redo());
    }

    #[test]
    fn rejected_edit_is_not_recorded() {
        let mut history = EditHistory::new(survey());
        assert!(history.apply(SurveyEdit::RemoveElement("missing".into())).is_err());
        assert!(!history.can_undo());
        assert!(!history.is_dirty());
    }

    #[test]
    fn history_limit_drops_oldest() {
        let mut history = EditHistory::new(survey()).with_limit(2);
        for title in ["a", "b", "c"] {
            history.apply(SurveyEdit::SetTitle(title.into())).unwrap();
        }
        assert!(history.undo());
        assert!(history.undo());
        assert!(!history.undo());
        assert_eq!(history.current().title, "a");
    }

    #[tokio::test]
    async fn save_inserts_then_updates() {
        let repo = MemoryRepository::<Survey>::new();
        let mut history = EditHistory::new(survey());
        history.apply(SurveyEdit::SetTitle("Saved".into())).unwrap();

        let id = history.save(&repo).await.unwrap().id;
        assert!(!id.is_nil());
        assert!(!history.is_dirty());

        history.apply(SurveyEdit::SetTitle("Saved again".into())).unwrap();
        history.save(&repo).await.unwrap();

        let stored = repo.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Saved again");

        // Undoing past the first save still targets the stored row.
        assert!(history.undo());
        assert!(history.undo());
        assert_eq!(history.current().id, id);
    }
}
