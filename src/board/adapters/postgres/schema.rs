//! Diesel schema for project and task persistence.

diesel::table! {
    /// Design-review projects.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks owned by projects.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Rich-text content.
        name -> Text,
        /// Stored attachment name.
        #[max_length = 255]
        image -> Nullable<Varchar>,
        /// Workflow status; NULL in legacy rows.
        #[max_length = 20]
        status -> Nullable<Varchar>,
        /// Reporter name.
        #[max_length = 100]
        pelapor -> Nullable<Varchar>,
        /// Assignee name.
        #[max_length = 100]
        eksekutor -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> projects (project_id));
diesel::allow_tables_to_appear_in_same_query!(projects, tasks);
