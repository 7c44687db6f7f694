/// Call sub-signatures recognised by the statement classifier and the assembler.
///
/// A sub-signature is `"<return type> <name>(<param>,<param>)"`, without the
/// declaring class.
pub mod signatures {
    // Attach child to container
    pub const ADD_VIEW: &[&str] = &[
        "void addView(android.view.View,android.view.ViewGroup$LayoutParams)",
        "void addView(android.view.View,int)",
        "void addView(android.view.View,int,android.view.ViewGroup$LayoutParams)",
        "void addView(android.view.View)",
        "void addView(android.view.View,int,int)",
        "void addHeaderView(android.view.View)",
    ];

    // Adapter row materialization
    pub const ADAPTER_GET_VIEW: &[&str] = &[
        "android.view.View getView(int,android.view.View,android.view.ViewGroup)",
        "android.view.View newView(android.content.Context,android.database.Cursor,android.view.ViewGroup)",
        "void bindView(android.view.View,android.content.Context,android.database.Cursor)",
    ];

    // Layout inflation
    pub const INFLATE: &[&str] = &[
        "android.view.View inflate(int,android.view.ViewGroup)",
        "android.view.View inflate(int,android.view.ViewGroup,boolean)",
        "void inflate(int,android.view.ViewGroup,android.support.v4.view.AsyncLayoutInflater.OnInflateFinishedListener)",
        "android.view.View inflate(android.content.Context,int,android.view.ViewGroup)",
    ];

    // Obtain list container
    pub const GET_LIST_VIEW: &[&str] = &[
        "android.widget.ListView getListView()",
    ];

    // Resolve view by identifier
    pub const FIND_VIEW_BY_ID: &[&str] = &[
        "android.view.View findViewById(int)",
    ];

    pub const GET_CHILD_AT_NAME: &str = "getChildAt";

    // Screen content
    pub const SET_CONTENT_VIEW_ID: &str = "void setContentView(int)";
    pub const SET_CONTENT_VIEW: &[&str] = &[
        "void setContentView(android.view.View)",
        "void setContentView(android.view.View,android.view.ViewGroup$LayoutParams)",
    ];

    // Menus
    pub const MENU_INFLATE: &str = "void inflate(int,android.view.Menu)";
    pub const ON_CREATE_OPTIONS_MENU: &str = "boolean onCreateOptionsMenu(android.view.Menu)";
    pub const ON_CREATE_CONTEXT_MENU: &str =
        "void onCreateContextMenu(android.view.ContextMenu,android.view.View,android.view.ContextMenu.ContextMenuInfo)";
    pub const ON_CREATE_PANEL_MENU: &str = "boolean onCreatePanelMenu(int,android.view.Menu)";
    pub const ON_OPTIONS_ITEM_SELECTED: &str = "boolean onOptionsItemSelected(android.view.MenuItem)";
    pub const ON_CONTEXT_ITEM_SELECTED: &str = "boolean onContextItemSelected(android.view.MenuItem)";

    // Widget attribute setters
    pub const SET_TEXT: &[&str] = &[
        "void setText(int)",
        "void setText(java.lang.CharSequence)",
        "void setText(java.lang.CharSequence,android.widget.TextView.BufferType)",
        "void setText(int,android.widget.TextView.BufferType)",
        "void setTextKeepState(java.lang.CharSequence)",
        "void setTextKeepState(java.lang.CharSequence,android.widget.TextView.BufferType)",
        "void setHint(int)",
        "void setHint(java.lang.CharSequence)",
        "void setError(java.lang.CharSequence)",
        "void setContentDescription(java.lang.CharSequence)",
        "void setTooltipText(java.lang.CharSequence)",
    ];

    pub const SET_INPUT_TYPE: &[&str] = &[
        "void setInputType(int)",
    ];

    pub const SET_IMAGE: &[&str] = &[
        "void setImageDrawable(android.graphics.drawable.Drawable)",
        "void setImageResource(int)",
        "void setBackgroundDrawable(android.graphics.drawable.Drawable)",
        "void setBackground(android.graphics.drawable.Drawable)",
        "void setForeground(android.graphics.drawable.Drawable)",
    ];

    pub const SET_LISTENER: &[&str] = &[
        "void setOnClickListener(android.view.View$OnClickListener)",
        "void setOnLongClickListener(android.view.View$OnLongClickListener)",
        "void setOnTouchListener(android.view.View$OnTouchListener)",
        "void setOnKeyListener(android.view.View$OnKeyListener)",
        "void setOnFocusChangeListener(android.view.View$OnFocusChangeListener)",
        "void setOnItemClickListener(android.widget.AdapterView$OnItemClickListener)",
        "void setOnItemLongClickListener(android.widget.AdapterView$OnItemLongClickListener)",
        "void setOnItemSelectedListener(android.widget.AdapterView$OnItemSelectedListener)",
        "void setOnCheckedChangeListener(android.widget.CompoundButton$OnCheckedChangeListener)",
        "void setOnCheckedChangeListener(android.widget.RadioGroup$OnCheckedChangeListener)",
        "void setOnEditorActionListener(android.widget.TextView$OnEditorActionListener)",
        "void setOnSeekBarChangeListener(android.widget.SeekBar$OnSeekBarChangeListener)",
        "void addTextChangedListener(android.text.TextWatcher)",
    ];

    // Message-box builders
    pub const DIALOG_SET_TITLE: &[&str] = &[
        "android.app.AlertDialog$Builder setTitle(java.lang.CharSequence)",
        "android.support.v7.app.AlertDialog$Builder setTitle(java.lang.CharSequence)",
        "android.app.AlertDialog$Builder setTitle(int)",
        "android.support.v7.app.AlertDialog$Builder setTitle(int)",
    ];

    pub const DIALOG_SET_MESSAGE: &[&str] = &[
        "android.app.AlertDialog$Builder setMessage(java.lang.CharSequence)",
        "android.support.v7.app.AlertDialog$Builder setMessage(java.lang.CharSequence)",
        "android.app.AlertDialog$Builder setMessage(int)",
        "android.support.v7.app.AlertDialog$Builder setMessage(int)",
    ];

    pub const DIALOG_SET_ICON: &[&str] = &[
        "android.app.AlertDialog$Builder setIcon(int)",
        "android.support.v7.app.AlertDialog$Builder setIcon(int)",
    ];

    pub const DIALOG_SET_BUTTON: &[&str] = &[
        "android.app.AlertDialog$Builder setPositiveButton(int,android.content.DialogInterface$OnClickListener)",
        "android.support.v7.app.AlertDialog$Builder setPositiveButton(int,android.content.DialogInterface$OnClickListener)",
        "android.app.AlertDialog$Builder setPositiveButton(java.lang.CharSequence,android.content.DialogInterface$OnClickListener)",
        "android.support.v7.app.AlertDialog$Builder setPositiveButton(java.lang.CharSequence,android.content.DialogInterface$OnClickListener)",
        "android.app.AlertDialog$Builder setNegativeButton(int,android.content.DialogInterface$OnClickListener)",
        "android.support.v7.app.AlertDialog$Builder setNegativeButton(int,android.content.DialogInterface$OnClickListener)",
        "android.app.AlertDialog$Builder setNegativeButton(java.lang.CharSequence,android.content.DialogInterface$OnClickListener)",
        "android.support.v7.app.AlertDialog$Builder setNegativeButton(java.lang.CharSequence,android.content.DialogInterface$OnClickListener)",
        "android.app.AlertDialog$Builder setNeutralButton(int,android.content.DialogInterface$OnClickListener)",
        "android.support.v7.app.AlertDialog$Builder setNeutralButton(int,android.content.DialogInterface$OnClickListener)",
        "android.app.AlertDialog$Builder setNeutralButton(java.lang.CharSequence,android.content.DialogInterface$OnClickListener)",
        "android.support.v7.app.AlertDialog$Builder setNeutralButton(java.lang.CharSequence,android.content.DialogInterface$OnClickListener)",
    ];

    // Fragment transactions
    pub const FRAGMENT_TRANSACTION: &[&str] = &[
        "android.app.FragmentTransaction add(android.app.Fragment,java.lang.String)",
        "android.app.FragmentTransaction add(int,android.app.Fragment,java.lang.String)",
        "android.app.FragmentTransaction add(int,android.app.Fragment)",
        "android.app.FragmentTransaction replace(int,android.app.Fragment,java.lang.String)",
        "android.app.FragmentTransaction replace(int,android.app.Fragment)",
        "android.support.v4.app.FragmentTransaction add(android.support.v4.app.Fragment,java.lang.String)",
        "android.support.v4.app.FragmentTransaction add(int,android.support.v4.app.Fragment,java.lang.String)",
        "android.support.v4.app.FragmentTransaction add(int,android.support.v4.app.Fragment)",
        "android.support.v4.app.FragmentTransaction replace(int,android.support.v4.app.Fragment,java.lang.String)",
        "android.support.v4.app.FragmentTransaction replace(int,android.support.v4.app.Fragment)",
    ];
}
