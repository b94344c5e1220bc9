//! Common C# sources for tests.

// Undocumented declarations
pub const BARE_CLASS: &str = "public class Foo\n{\n}\n";

pub const BARE_CLASS_WITH_MEMBERS: &str = r#"namespace Shop
{
    public class Cart
    {
        private int count;

        public Cart(int initial) { count = initial; }

        public int Count { get { return count; } }

        public T Find<T>(string key) where T : class => null;

        public void Clear() { count = 0; }
    }
}
"#;

// File-level findings
pub const TWO_TOP_LEVEL_ENUMS: &str = r#"namespace Palette
{
    /// <summary>Primary colors.</summary>
    /// <remarks>
    /// 功能: x
    /// 架构层级: x
    /// 模块: x
    /// 继承/实现关系: x
    /// 依赖: x
    /// 扩展点: x
    /// 特性: x
    /// 重要逻辑: x
    /// 数据流: x
    /// 使用示例: x
    /// </remarks>
    public enum Color { Red, Green }

    /// <summary>Brush shapes.</summary>
    /// <remarks>
    /// 功能: x
    /// 架构层级: x
    /// 模块: x
    /// 继承/实现关系: x
    /// 依赖: x
    /// 扩展点: x
    /// 特性: x
    /// 重要逻辑: x
    /// 数据流: x
    /// 使用示例: x
    /// </remarks>
    public enum Shape { Round, Flat }
}
"#;

pub const CONDITIONAL_CLASS: &str = r#"#if DEBUG
/// <summary>Debug helpers.</summary>
/// <remarks>
/// 功能: x
/// 架构层级: x
/// 模块: x
/// 继承/实现关系: x
/// 依赖: x
/// 扩展点: x
/// 特性: x
/// 重要逻辑: x
/// 数据流: x
/// 使用示例: x
/// </remarks>
public static class DebugTools
{
}
#endif
"#;

/// A complete type block for `class C`, without a trailing newline.
pub const COMPLETE_TYPE_DOC: &str = r#"/// <summary>Container.</summary>
/// <remarks>
/// 功能: x
/// 架构层级: x
/// 模块: x
/// 继承/实现关系: x
/// 依赖: x
/// 扩展点: x
/// 特性: x
/// 重要逻辑: x
/// 数据流: x
/// 使用示例: x
/// </remarks>"#;

// Syntax the repair pipeline must refuse
pub const BROKEN_ENUM: &str = "/// <summary>E</summary>\nenum E\n";
