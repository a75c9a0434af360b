//! 操作人目录
//!
//! 读取历史时批量解析操作人身份。员工数据由宿主系统管理，这里只定义接口
//! 和一个基于内存表的实现。

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::history::ActorIdentity;

use super::error::ActorLookupError;

/// 操作人目录接口
#[async_trait]
pub trait ActorDirectory: Send + Sync {
    /// 批量查询；不存在的 id 直接缺席，不是错误
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<ActorIdentity>, ActorLookupError>;
}

/// 内存操作人表
#[derive(Debug, Default)]
pub struct StaticActorDirectory {
    actors: RwLock<HashMap<String, ActorIdentity>>,
    lookups: AtomicUsize,
}

impl StaticActorDirectory {
    pub fn new(actors: impl IntoIterator<Item = ActorIdentity>) -> Self {
        Self {
            actors: RwLock::new(actors.into_iter().map(|a| (a.id.clone(), a)).collect()),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn insert(&self, actor: ActorIdentity) {
        self.actors.write().insert(actor.id.clone(), actor);
    }

    /// 已执行的批量查询次数
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ActorDirectory for StaticActorDirectory {
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<ActorIdentity>, ActorLookupError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let actors = self.actors.read();
        Ok(ids.iter().filter_map(|id| actors.get(id).cloned()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(id: &str, first: &str) -> ActorIdentity {
        ActorIdentity {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: "Pérez".to_string(),
            username: first.to_lowercase(),
        }
    }

    #[tokio::test]
    async fn test_missing_ids_are_absent() {
        let directory = StaticActorDirectory::new([actor("u-1", "Luis")]);
        directory.insert(actor("u-2", "Marta"));

        let found = directory
            .find_by_ids(&["u-1".to_string(), "u-404".to_string(), "u-2".to_string()])
            .await
            .unwrap();
        let names: Vec<&str> = found.iter().map(|a| a.first_name.as_str()).collect();
        assert_eq!(names, vec!["Luis", "Marta"]);
        assert_eq!(directory.lookup_count(), 1);
    }
}
