use database_traits::dao::GenericDao;
use specification_commands::{
    CreateSpecificationCommand, DeleteSpecificationCommand,
    UpdateSpecificationCommand,
};
use specification_dao::SpecificationDao;
use specification_errors::SpecificationError;
use specification_models::{CategorySpecification, Specification};
use sql_connection::SqlConnect;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct ListSpecificationsHandler {
    specification_dao: SpecificationDao,
}

impl ListSpecificationsHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            specification_dao: SpecificationDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
    ) -> Result<Vec<Specification>, SpecificationError> {
        self.specification_dao.all().await
    }
}

#[derive(Clone)]
pub struct GetSpecificationHandler {
    specification_dao: SpecificationDao,
}

impl GetSpecificationHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            specification_dao: SpecificationDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, specification_id: i64,
    ) -> Result<Specification, SpecificationError> {
        self.specification_dao.find_by_id(specification_id).await
    }
}

/// `{id, name}` of every specification defined for a category. An unknown
/// category simply has none.
#[derive(Clone)]
pub struct CategorySpecificationsHandler {
    specification_dao: SpecificationDao,
}

impl CategorySpecificationsHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            specification_dao: SpecificationDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, category_id: i64,
    ) -> Result<Vec<CategorySpecification>, SpecificationError> {
        self.specification_dao.for_category(category_id).await
    }
}

#[derive(Clone)]
pub struct CreateSpecificationHandler {
    specification_dao: SpecificationDao,
}

impl CreateSpecificationHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            specification_dao: SpecificationDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: CreateSpecificationCommand,
    ) -> Result<Specification, SpecificationError> {
        command.validate().map_err(SpecificationError::validation)?;

        let specification = self.specification_dao.create(command).await?;
        info!(
            specification_id = specification.id,
            category_id = specification.category_id,
            "Specification created"
        );
        Ok(specification)
    }
}

#[derive(Clone)]
pub struct UpdateSpecificationHandler {
    specification_dao: SpecificationDao,
}

impl UpdateSpecificationHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            specification_dao: SpecificationDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: UpdateSpecificationCommand,
    ) -> Result<Specification, SpecificationError> {
        command.validate().map_err(SpecificationError::validation)?;

        self.specification_dao
            .update(command.specification_id, command)
            .await
    }
}

#[derive(Clone)]
pub struct DeleteSpecificationHandler {
    specification_dao: SpecificationDao,
}

impl DeleteSpecificationHandler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            specification_dao: SpecificationDao::new(db),
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: DeleteSpecificationCommand,
    ) -> Result<(), SpecificationError> {
        self.specification_dao
            .delete(command.specification_id)
            .await?;
        info!(
            specification_id = command.specification_id,
            "Specification deleted"
        );
        Ok(())
    }
}
