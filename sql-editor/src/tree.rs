//! 连接树存储模块

use common::models::{ConnectionNode, InstanceId};

/// 保存 实例 → 数据库 → 数据表 的层级
///
/// 连接树只会被整体替换。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeStore {
    nodes: Vec<ConnectionNode>,
}

impl TreeStore {
    /// 整体替换连接树
    pub fn set_tree(&mut self, nodes: Vec<ConnectionNode>) {
        self.nodes = nodes;
    }

    /// 顶层（实例）节点，保持树中顺序
    pub fn nodes(&self) -> &[ConnectionNode] {
        &self.nodes
    }

    /// 按 ID 查找实例节点
    ///
    /// 只扫描顶层：数据库与数据表的 ID 属于各自的 ID 空间，不能与实例 ID 匹配。
    pub fn find_node_by_instance_id(&self, id: InstanceId) -> Option<&ConnectionNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}
