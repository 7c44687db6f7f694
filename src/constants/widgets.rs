//! Default widget class tables used by the assembler configuration

/// Packages whose constructors create widgets
pub fn view_class_prefixes() -> Vec<String> {
    ["android.widget.", "android.view.", "android.support.", "androidx.", "com.google.android.material."]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Widget classes materialised as text widgets
pub fn text_classes() -> Vec<String> {
    [
        "android.widget.TextView",
        "android.widget.EditText",
        "android.widget.AutoCompleteTextView",
        "android.widget.MultiAutoCompleteTextView",
        "android.widget.Button",
        "android.widget.CheckBox",
        "android.widget.RadioButton",
        "android.widget.Switch",
        "android.widget.ToggleButton",
        "android.support.v7.widget.AppCompatEditText",
        "android.support.v7.widget.AppCompatTextView",
        "android.support.v7.widget.AppCompatButton",
        "androidx.appcompat.widget.AppCompatEditText",
        "androidx.appcompat.widget.AppCompatTextView",
        "androidx.appcompat.widget.AppCompatButton",
        "com.google.android.material.textfield.TextInputEditText",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Widget classes materialised as containers
pub fn group_classes() -> Vec<String> {
    [
        "android.view.ViewGroup",
        "android.widget.LinearLayout",
        "android.widget.RelativeLayout",
        "android.widget.FrameLayout",
        "android.widget.TableLayout",
        "android.widget.TableRow",
        "android.widget.GridLayout",
        "android.widget.ScrollView",
        "android.widget.HorizontalScrollView",
        "android.widget.ListView",
        "android.widget.GridView",
        "android.widget.Spinner",
        "android.widget.RadioGroup",
        "android.widget.TabHost",
        "android.support.v7.widget.RecyclerView",
        "android.support.constraint.ConstraintLayout",
        "androidx.recyclerview.widget.RecyclerView",
        "androidx.constraintlayout.widget.ConstraintLayout",
        "androidx.coordinatorlayout.widget.CoordinatorLayout",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Widgets whose attribute evidence is not bound
pub fn ignored_classes() -> Vec<String> {
    vec![
        "android.widget.ProgressBar".to_string(),
        "android.webkit.WebView".to_string(),
    ]
}

/// Message-box builder classes
pub fn dialog_builder_classes() -> Vec<String> {
    vec![
        "android.app.AlertDialog$Builder".to_string(),
        "android.support.v7.app.AlertDialog$Builder".to_string(),
        "androidx.appcompat.app.AlertDialog$Builder".to_string(),
    ]
}

/// Class of list containers obtained via `getListView()`
pub const LIST_VIEW_CLASS: &str = "android.widget.ListView";

/// Class given to adapter rows whose concrete type is not known
pub const ADAPTER_ROW_CLASS: &str = "android.view.View";
