use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use sauron::{
    html::{attributes, attributes::*, *},
    prelude::*,
};
use shared::{
    views, Category, CategoryFilter, Priority, PriorityFilter, Snapshot, Status, Store,
    StoreError, Task,
};
use uuid::Uuid;
use web_sys::{console, window};

use crate::api::HttpCollection;
use crate::form::{self, TaskForm};
use crate::shortcut::{self, QUICK_ADD_INPUT, QUICK_ADD_TOGGLE};
use crate::style;

pub type TaskStore = Store<HttpCollection<Task>, HttpCollection<Category>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    id: u64,
    kind: NoticeKind,
    message: String,
}

#[derive(Debug, Clone)]
pub enum Msg {
    Load,
    Loaded(Result<(), StoreError>),

    // Filters
    SelectCategory(CategoryFilter),
    SetSearchQuery(String),
    SetPriorityFilter(PriorityFilter),

    // Quick add
    ToggleQuickAdd,
    SetQuickAddTitle(String),
    SubmitQuickAdd,

    // Create/edit modal
    OpenCreate,
    OpenEdit(Uuid),
    CloseForm,
    SetFormTitle(String),
    SetFormDescription(String),
    SetFormCategory(Option<Uuid>),
    SetFormPriority(Priority),
    SetFormDueDate(String),
    SubmitForm,

    // Task operations
    ToggleTask(Uuid),
    DeleteTask(Uuid),
    ClearCompleted,
    QuickAdded(Result<Task, StoreError>),
    TaskCreated(Result<Task, StoreError>),
    TaskSaved(Uuid, Result<Task, StoreError>),
    TaskToggled(Uuid, Result<Task, StoreError>),
    TaskDeleted(Uuid, Result<(), StoreError>),
    CompletedCleared(Result<Vec<(Uuid, shared::Result<()>)>, StoreError>),

    ToggleCompletedSection,
    DismissNotice(u64),
}

pub struct Model {
    store: TaskStore,
    snapshot: Snapshot,
    today: NaiveDate,
    quick_add: Option<String>,
    form: Option<TaskForm>,
    show_completed: bool,
    pending: HashSet<Uuid>,
    notices: Vec<Notice>,
    next_notice: u64,
}

impl Default for Model {
    fn default() -> Self {
        let store = Store::new(
            HttpCollection::new("tasks"),
            HttpCollection::new("categories"),
        );
        Self {
            snapshot: store.snapshot(),
            store,
            today: Local::now().date_naive(),
            quick_add: None,
            form: None,
            show_completed: true,
            pending: HashSet::new(),
            notices: Vec::new(),
            next_notice: 0,
        }
    }
}

impl Application for Model {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        shortcut::listen_for_quick_add();
        Cmd::new(async { Msg::Load })
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Load => {
                self.snapshot.status = Status::Loading;
                let store = self.store.clone();
                Cmd::new(async move { Msg::Loaded(store.load().await) })
            }
            Msg::Loaded(result) => {
                self.refresh();
                if let Err(err) = result {
                    console::log_1(&format!("Failed to load data: {err}").into());
                }
                Cmd::none()
            }
            Msg::SelectCategory(filter) => {
                self.store.set_selected_category(filter);
                self.refresh();
                Cmd::none()
            }
            Msg::SetSearchQuery(query) => {
                self.store.set_search_query(query);
                self.refresh();
                Cmd::none()
            }
            Msg::SetPriorityFilter(filter) => {
                self.store.set_priority_filter(filter);
                self.refresh();
                Cmd::none()
            }
            Msg::ToggleQuickAdd => {
                self.quick_add = match self.quick_add {
                    Some(_) => None,
                    None => Some(String::new()),
                };
                Cmd::none()
            }
            Msg::SetQuickAddTitle(title) => {
                self.quick_add = Some(title);
                Cmd::none()
            }
            Msg::SubmitQuickAdd => {
                let Some(title) = self.quick_add.clone().filter(|t| !t.trim().is_empty()) else {
                    return Cmd::none();
                };
                let store = self.store.clone();
                Cmd::new(async move { Msg::QuickAdded(store.quick_add(title).await) })
            }
            Msg::OpenCreate => {
                let default_category = self
                    .snapshot
                    .filter
                    .selected_category
                    .selected()
                    .or_else(|| self.snapshot.categories.first().map(|c| c.id));
                self.form = Some(TaskForm::create(default_category));
                Cmd::none()
            }
            Msg::OpenEdit(id) => {
                if let Some(task) = self.snapshot.find_task(id) {
                    self.form = Some(TaskForm::edit(task));
                }
                Cmd::none()
            }
            Msg::CloseForm => {
                self.form = None;
                Cmd::none()
            }
            Msg::SetFormTitle(title) => self.edit_form(|form| form.input.title = title),
            Msg::SetFormDescription(description) => {
                self.edit_form(|form| form.input.description = description)
            }
            Msg::SetFormCategory(category_id) => {
                self.edit_form(|form| form.input.category_id = category_id)
            }
            Msg::SetFormPriority(priority) => {
                self.edit_form(|form| form.input.priority = Some(priority))
            }
            Msg::SetFormDueDate(due_date) => self.edit_form(|form| form.input.due_date = due_date),
            Msg::SubmitForm => {
                let Some(form) = self.form.clone().filter(TaskForm::can_submit) else {
                    return Cmd::none();
                };
                let store = self.store.clone();
                match form.editing {
                    Some(id) => {
                        self.pending.insert(id);
                        Cmd::new(async move { Msg::TaskSaved(id, store.edit_task(id, form.input).await) })
                    }
                    None => Cmd::new(async move { Msg::TaskCreated(store.create_task(form.input).await) }),
                }
            }
            Msg::ToggleTask(id) => {
                self.pending.insert(id);
                let store = self.store.clone();
                Cmd::new(async move { Msg::TaskToggled(id, store.toggle_task(id).await) })
            }
            Msg::DeleteTask(id) => {
                self.pending.insert(id);
                let store = self.store.clone();
                Cmd::new(async move { Msg::TaskDeleted(id, store.delete_task(id).await) })
            }
            Msg::ClearCompleted => {
                let confirmed = window()
                    .and_then(|w| {
                        w.confirm_with_message("Are you sure you want to clear all completed tasks?")
                            .ok()
                    })
                    .unwrap_or(false);
                if !confirmed {
                    return Cmd::none();
                }
                self.pending
                    .extend(self.snapshot.tasks.iter().filter(|t| t.completed).map(|t| t.id));
                let store = self.store.clone();
                Cmd::new(async move { Msg::CompletedCleared(store.clear_completed().await) })
            }
            Msg::QuickAdded(result) => {
                form::settle_quick_add(&mut self.quick_add, &result);
                self.refresh();
                match result {
                    Ok(task) => self.notify(NoticeKind::Success, format!("Created \"{}\"", task.title)),
                    Err(err) => self.notify(NoticeKind::Error, format!("Failed to create task: {err}")),
                }
                Cmd::none()
            }
            Msg::TaskCreated(result) => {
                form::settle_form(&mut self.form, None, &result);
                self.refresh();
                match result {
                    Ok(task) => self.notify(NoticeKind::Success, format!("Created \"{}\"", task.title)),
                    Err(err) => self.notify(NoticeKind::Error, format!("Failed to create task: {err}")),
                }
                Cmd::none()
            }
            Msg::TaskSaved(id, result) => {
                form::settle_form(&mut self.form, Some(id), &result);
                self.pending.remove(&id);
                self.refresh();
                match result {
                    Ok(task) => self.notify(NoticeKind::Success, format!("Updated \"{}\"", task.title)),
                    Err(err) => self.notify(NoticeKind::Error, format!("Failed to update task: {err}")),
                }
                Cmd::none()
            }
            Msg::TaskToggled(id, result) => {
                self.pending.remove(&id);
                self.refresh();
                if let Err(err) = result {
                    self.notify(NoticeKind::Error, format!("Failed to update task: {err}"));
                }
                Cmd::none()
            }
            Msg::TaskDeleted(id, result) => {
                self.pending.remove(&id);
                self.refresh();
                match result {
                    Ok(()) => self.notify(NoticeKind::Success, "Task deleted".to_string()),
                    Err(err) => self.notify(NoticeKind::Error, format!("Failed to delete task: {err}")),
                }
                Cmd::none()
            }
            Msg::CompletedCleared(result) => {
                self.refresh();
                match result {
                    Ok(outcomes) => {
                        for (id, outcome) in outcomes {
                            self.pending.remove(&id);
                            if let Err(err) = outcome {
                                self.notify(NoticeKind::Error, format!("Failed to delete task: {err}"));
                            }
                        }
                    }
                    Err(err) => {
                        self.pending.clear();
                        self.notify(NoticeKind::Error, format!("Failed to clear completed tasks: {err}"));
                    }
                }
                Cmd::none()
            }
            Msg::ToggleCompletedSection => {
                self.show_completed = !self.show_completed;
                Cmd::none()
            }
            Msg::DismissNotice(id) => {
                self.notices.retain(|n| n.id != id);
                Cmd::none()
            }
        }
    }

    fn view(&self) -> Node<Msg> {
        let body = match &self.snapshot.status {
            Status::Loading => self.view_loading(),
            Status::Errored(err) => self.view_error(&err.to_string()),
            Status::Ready => self.view_ready(),
        };
        div(
            [class("min-h-screen bg-ctp-base text-ctp-text")],
            [body, self.view_notices()],
        )
    }
}

impl Model {
    fn refresh(&mut self) {
        self.snapshot = self.store.snapshot();
        self.today = Local::now().date_naive();
    }

    fn edit_form(&mut self, edit: impl FnOnce(&mut TaskForm)) -> Cmd<Msg> {
        if let Some(form) = self.form.as_mut() {
            edit(form);
        }
        Cmd::none()
    }

    fn notify(&mut self, kind: NoticeKind, message: String) {
        if kind == NoticeKind::Error {
            console::log_1(&format!("Error: {message}").into());
        }
        self.notices.push(Notice {
            id: self.next_notice,
            kind,
            message,
        });
        self.next_notice += 1;
    }

    fn view_loading(&self) -> Node<Msg> {
        div([class("flex items-center justify-center min-h-screen")], [
            div([class("text-center")], [
                div([class("w-12 h-12 mx-auto mb-4 rounded-full border-4 border-ctp-surface2 border-t-ctp-blue animate-spin")], []),
                p([class("text-ctp-subtext0 italic")], [text("Loading your tasks...")]),
            ]),
        ])
    }

    fn view_error(&self, message: &str) -> Node<Msg> {
        div([class("flex items-center justify-center min-h-screen")], [
            div([class("max-w-md bg-ctp-surface0 rounded-lg shadow-lg p-8 border border-ctp-surface1 text-center")], [
                h2([class("text-xl font-semibold text-ctp-text mb-2")], [text("Something went wrong")]),
                p([class("text-ctp-subtext1 mb-6")], [text(message)]),
                button([
                    on_click(|_| Msg::Load),
                    class("bg-ctp-blue hover:bg-ctp-sapphire text-ctp-base font-medium px-6 py-2 rounded-md transition-colors duration-200"),
                ], [text("Try Again")]),
            ]),
        ])
    }

    fn view_ready(&self) -> Node<Msg> {
        div([], [
            self.view_header(),
            div([class("max-w-6xl mx-auto px-6 py-8 flex gap-8")], [
                self.view_sidebar(),
                div([class("flex-1 space-y-8")], [self.view_task_list()]),
            ]),
            match &self.form {
                Some(form) => self.view_form(form),
                None => span([], []),
            },
        ])
    }

    fn view_header(&self) -> Node<Msg> {
        let percentage = self.snapshot.completion_percentage();
        header([class("bg-ctp-mantle shadow-lg border-b border-ctp-surface0")], [
            div([class("max-w-6xl mx-auto px-6 py-4 space-y-4")], [
                div([class("flex items-center justify-between")], [
                    div([], [
                        h1([class("text-2xl font-bold text-ctp-text")], [text("TaskFlow")]),
                        p([class("text-sm text-ctp-subtext0")], [text("Stay organized and get things done")]),
                    ]),
                    div([class("flex items-center space-x-4")], [
                        span([class("text-sm text-ctp-subtext1")], [text(&format!("{percentage}% complete"))]),
                        div([class("w-32 bg-ctp-surface2 rounded-full h-2")], [
                            div([
                                class("bg-ctp-green h-2 rounded-full transition-all duration-500"),
                                attributes::styles([("width", format!("{percentage}%"))]),
                            ], []),
                        ]),
                        button([
                            id(QUICK_ADD_TOGGLE),
                            on_click(|_| Msg::ToggleQuickAdd),
                            class("bg-ctp-surface1 hover:bg-ctp-surface2 text-ctp-text px-4 py-2 rounded-md transition-colors duration-200"),
                        ], [text("Quick Add")]),
                        button([
                            on_click(|_| Msg::OpenCreate),
                            class("bg-ctp-blue hover:bg-ctp-sapphire text-ctp-base font-medium px-4 py-2 rounded-md transition-colors duration-200"),
                        ], [text("New Task")]),
                    ]),
                ]),
                match &self.quick_add {
                    Some(title) => div([class("flex space-x-2")], [
                        input([
                            id(QUICK_ADD_INPUT),
                            r#type("text"),
                            placeholder("What needs to be done?"),
                            value(title),
                            on_input(|event| Msg::SetQuickAddTitle(event.value())),
                            class("flex-1 px-3 py-2 bg-ctp-surface0 border border-ctp-surface2 rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-blue focus:border-transparent"),
                        ], []),
                        button([
                            on_click(|_| Msg::SubmitQuickAdd),
                            disabled(title.trim().is_empty()),
                            class("bg-ctp-blue hover:bg-ctp-sapphire text-ctp-base font-medium px-4 py-2 rounded-md transition-colors duration-200"),
                        ], [text("Add")]),
                    ]),
                    None => span([], []),
                },
            ]),
        ])
    }

    fn view_sidebar(&self) -> Node<Msg> {
        let filter = &self.snapshot.filter;
        nav([class("w-64 space-y-6")], [
            input([
                r#type("text"),
                placeholder("Search tasks..."),
                value(&filter.search_query),
                on_input(|event| Msg::SetSearchQuery(event.value())),
                class("w-full px-3 py-2 bg-ctp-surface0 border border-ctp-surface2 rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-blue focus:border-transparent"),
            ], []),
            div([class("space-y-1")], {
                let mut items = vec![h3([class("text-xs font-semibold uppercase text-ctp-subtext0 mb-2")], [text("Priority")])];
                items.push(self.filter_chip("All Priorities", filter.priority_filter == PriorityFilter::All, Msg::SetPriorityFilter(PriorityFilter::All)));
                items.extend(Priority::ALL.into_iter().map(|priority| {
                    self.filter_chip(
                        style::priority_label(priority),
                        filter.priority_filter == PriorityFilter::Only(priority),
                        Msg::SetPriorityFilter(PriorityFilter::Only(priority)),
                    )
                }));
                items
            }),
            div([class("space-y-1")], {
                let mut items = vec![
                    h3([class("text-xs font-semibold uppercase text-ctp-subtext0 mb-2")], [text("Categories")]),
                    self.filter_chip(
                        &format!("All Tasks ({})", self.snapshot.tasks.len()),
                        filter.selected_category == CategoryFilter::All,
                        Msg::SelectCategory(CategoryFilter::All),
                    ),
                ];
                items.extend(self.snapshot.categories.iter().map(|category| self.category_chip(category)));
                items
            }),
        ])
    }

    fn filter_chip(&self, label: &str, active: bool, msg: Msg) -> Node<Msg> {
        button([
            on_click(move |_| msg.clone()),
            class(&format!(
                "w-full text-left px-3 py-2 rounded-md text-sm font-medium transition-colors duration-200 {}",
                style::toggle_chip(active)
            )),
        ], [text(label)])
    }

    fn category_chip(&self, category: &Category) -> Node<Msg> {
        let id = category.id;
        let active = self.snapshot.filter.selected_category == CategoryFilter::Category(id);
        button([
            on_click(move |_| Msg::SelectCategory(CategoryFilter::Category(id))),
            class(&format!(
                "w-full flex items-center justify-between px-3 py-2 rounded-md text-sm font-medium transition-colors duration-200 {}",
                style::toggle_chip(active)
            )),
        ], [
            span([class("flex items-center")], [
                span([
                    class("w-2 h-2 rounded-full mr-3"),
                    attributes::styles([("background-color", category.color.clone())]),
                ], []),
                text(&category.name),
            ]),
            span([class("text-xs")], [text(&self.snapshot.category_task_count(id).to_string())]),
        ])
    }

    fn view_task_list(&self) -> Node<Msg> {
        let active = self.snapshot.active_tasks();
        let completed = self.snapshot.completed_tasks();

        div([class("bg-ctp-surface0 rounded-lg shadow-lg p-6 border border-ctp-surface1 space-y-8")], [
            div([], [
                div([class("flex items-center justify-between mb-4")], [
                    h2([class("text-xl font-semibold text-ctp-text pb-2 border-b border-ctp-surface2")], [text("Active Tasks")]),
                    span([class("bg-ctp-blue/20 text-ctp-blue px-2 py-1 rounded-full text-sm font-medium")], [
                        text(&format!("{} active", active.len())),
                    ]),
                ]),
                if active.is_empty() {
                    div([class("text-center py-10 text-ctp-subtext0 italic")], [text("No active tasks. Add one to get started!")])
                } else {
                    ul([class("space-y-3")], active.iter().map(|task| self.view_task(task)).collect::<Vec<_>>())
                },
            ]),
            if completed.is_empty() {
                span([], [])
            } else {
                div([], [
                    div([class("flex items-center justify-between mb-4")], [
                        button([
                            on_click(|_| Msg::ToggleCompletedSection),
                            class("text-xl font-semibold text-ctp-text pb-2 border-b border-ctp-surface2"),
                        ], [text(&format!(
                            "{} Completed ({})",
                            if self.show_completed { "▾" } else { "▸" },
                            completed.len()
                        ))]),
                        button([
                            on_click(|_| Msg::ClearCompleted),
                            class("text-sm text-ctp-red hover:text-ctp-maroon transition-colors duration-200"),
                        ], [text("Clear completed")]),
                    ]),
                    if self.show_completed {
                        ul([class("space-y-3")], completed.iter().map(|task| self.view_task(task)).collect::<Vec<_>>())
                    } else {
                        span([], [])
                    },
                ])
            },
        ])
    }

    fn view_task(&self, task: &Task) -> Node<Msg> {
        let id = task.id;
        let busy = self.pending.contains(&id);
        let category = self.snapshot.resolve_category(task.category_id);
        let due = views::due_label(task, self.today);

        li([class(&format!(
            "flex items-start p-4 bg-ctp-surface1 rounded-lg border border-ctp-surface2 transition-opacity duration-200 {}",
            if busy { "opacity-50" } else { "" }
        ))], [
            input([
                r#type("checkbox"),
                checked(task.completed),
                disabled(busy),
                on_click(move |_| Msg::ToggleTask(id)),
                class("mt-1 mr-4 h-4 w-4"),
            ], []),
            div([class("flex-1 min-w-0")], [
                div([class("flex items-center space-x-2")], [
                    span([class(&format!("w-2 h-2 rounded-full {}", style::priority_dot(task.priority)))], []),
                    h3([class(&format!(
                        "font-medium {}",
                        if task.completed { "line-through text-ctp-subtext0" } else { "text-ctp-text" }
                    ))], [text(&task.title)]),
                ]),
                if task.description.is_empty() {
                    span([], [])
                } else {
                    p([class("text-sm text-ctp-subtext1 mt-1")], [text(&task.description)])
                },
                div([class("flex items-center space-x-2 mt-2 text-xs")], [
                    span([
                        class("px-2 py-1 rounded-full text-ctp-base"),
                        attributes::styles([("background-color", category.color.clone())]),
                    ], [text(&category.name)]),
                    match &due {
                        Some(label) => span([class(&format!("px-2 py-1 rounded-full {}", style::due_badge(label)))], [
                            text(&label.to_string()),
                        ]),
                        None => span([], []),
                    },
                ]),
            ]),
            div([class("flex space-x-2 ml-4")], [
                button([
                    on_click(move |_| Msg::OpenEdit(id)),
                    disabled(busy),
                    class("text-sm text-ctp-blue hover:text-ctp-sapphire transition-colors duration-200"),
                ], [text("Edit")]),
                button([
                    on_click(move |_| Msg::DeleteTask(id)),
                    disabled(busy),
                    class("text-sm text-ctp-red hover:text-ctp-maroon transition-colors duration-200"),
                ], [text("Delete")]),
            ]),
        ])
    }

    fn view_form(&self, form: &TaskForm) -> Node<Msg> {
        let input_class = "w-full px-3 py-2 bg-ctp-surface0 border border-ctp-surface2 rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-blue focus:border-transparent";
        // New tasks without a category land in the default one, so only edits offer clearing it.
        let mut category_options = Vec::new();
        if form.editing.is_some() {
            category_options.push(self.form_chip(
                "Uncategorized",
                form.input.category_id.is_none(),
                Msg::SetFormCategory(None),
            ));
        }
        category_options.extend(self.snapshot.categories.iter().map(|category| {
            self.form_chip(
                &category.name,
                form.input.category_id == Some(category.id),
                Msg::SetFormCategory(Some(category.id)),
            )
        }));

        div([class("fixed inset-0 bg-ctp-crust/70 flex items-center justify-center z-50")], [
            div([class("w-full max-w-lg bg-ctp-surface0 rounded-lg shadow-lg p-6 border border-ctp-surface1 space-y-4")], [
                div([class("flex items-center justify-between")], [
                    h2([class("text-xl font-semibold text-ctp-text")], [text(form.heading())]),
                    button([on_click(|_| Msg::CloseForm), class("text-ctp-subtext0 hover:text-ctp-text")], [text("✕")]),
                ]),
                input([
                    r#type("text"),
                    placeholder("Task title"),
                    value(&form.input.title),
                    on_input(|event| Msg::SetFormTitle(event.value())),
                    class(input_class),
                ], []),
                textarea([
                    placeholder("Task description"),
                    value(&form.input.description),
                    on_input(|event| Msg::SetFormDescription(event.value())),
                    class(&format!("{input_class} h-20 resize-y")),
                ], []),
                div([class("flex flex-wrap gap-2")], category_options),
                div([class("flex gap-2")], Priority::ALL.into_iter().map(|priority| {
                    self.form_chip(priority.as_str(), form.priority() == priority, Msg::SetFormPriority(priority))
                }).collect::<Vec<_>>()),
                input([
                    r#type("date"),
                    value(&form.input.due_date),
                    on_input(|event| Msg::SetFormDueDate(event.value())),
                    class(input_class),
                ], []),
                div([class("flex justify-end space-x-2")], [
                    button([
                        on_click(|_| Msg::CloseForm),
                        class("bg-ctp-surface1 hover:bg-ctp-surface2 text-ctp-text px-4 py-2 rounded-md transition-colors duration-200"),
                    ], [text("Cancel")]),
                    button([
                        on_click(|_| Msg::SubmitForm),
                        disabled(!form.can_submit()),
                        class("bg-ctp-blue hover:bg-ctp-sapphire text-ctp-base font-medium px-4 py-2 rounded-md transition-colors duration-200"),
                    ], [text(form.submit_label())]),
                ]),
            ]),
        ])
    }

    fn form_chip(&self, label: &str, active: bool, msg: Msg) -> Node<Msg> {
        button([
            on_click(move |_| msg.clone()),
            class(&format!(
                "px-3 py-1 rounded-full text-sm capitalize transition-colors duration-200 {}",
                style::toggle_chip(active)
            )),
        ], [text(label)])
    }

    fn view_notices(&self) -> Node<Msg> {
        div([class("fixed bottom-4 right-4 space-y-2 z-50")], self.notices.iter().map(|notice| {
            let id = notice.id;
            let tone = match notice.kind {
                NoticeKind::Success => "bg-ctp-green text-ctp-base",
                NoticeKind::Error => "bg-ctp-red text-ctp-base",
            };
            div([class(&format!("flex items-center justify-between px-4 py-2 rounded-md shadow-lg {tone}"))], [
                span([class("mr-4")], [text(&notice.message)]),
                button([on_click(move |_| Msg::DismissNotice(id)), class("font-bold")], [text("✕")]),
            ])
        }).collect::<Vec<_>>())
    }
}
